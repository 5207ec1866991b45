#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the badge service."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

/// Unified error type returned by the repository client, the renderer and the
/// configuration loader.
///
/// None of the variants is retried. The HTTP layer decides which public
/// message and status code a variant maps to; the text carried here is meant
/// for diagnostics only and never reaches a client verbatim.
#[derive(Debug, masterror::Error,)]
pub enum Error
{
    /// The caller supplied an identifier that cannot be used.
    #[error("invalid input: {message}")]
    InvalidInput
    {
        /// Human readable description of the rejected input.
        message: String,
    },
    /// The upstream API answered with a non-success status.
    #[error("{resource} was not found upstream: {message}")]
    UpstreamNotFound
    {
        /// Upstream resource that was requested.
        resource: String,
        /// Message reported by the upstream API.
        message:  String,
    },
    /// The upstream API answered successfully but listed no repositories.
    #[error("no repositories found for {username}")]
    UpstreamEmpty
    {
        /// Account whose repository list was empty.
        username: String,
    },
    /// Transport or decoding failure while talking to the upstream API.
    #[error("request for {resource} failed: {message}")]
    Upstream
    {
        /// Upstream resource that was requested.
        resource: String,
        /// Description of the transport failure.
        message:  String,
    },
    /// Filling the SVG template failed.
    #[error("failed to render badge: {message}")]
    RenderFailure
    {
        /// Description of the rendering problem.
        message: String,
    },
    /// Returned when the runtime configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Config
    {
        /// Human readable message describing the configuration problem.
        message: String,
    },
    /// Wraps I/O errors raised while binding or running the HTTP server.
    #[error("HTTP server failed on {address}: {source}")]
    Server
    {
        /// Address the server was bound to.
        address: String,
        /// Underlying I/O error reported by the operating system.
        source:  std::io::Error,
    },
}

impl Error
{
    /// Constructs an invalid input error from the provided message.
    pub fn invalid_input<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Constructs a render failure from the provided message.
    pub fn render<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::RenderFailure {
            message: message.into(),
        }
    }

    /// Constructs a configuration error from the provided message.
    pub fn config<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Config {
            message: message.into(),
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self,) -> String
    {
        format!("{self}")
    }
}

impl From<std::fmt::Error,> for Error
{
    fn from(source: std::fmt::Error,) -> Self
    {
        Self::render(source.to_string(),)
    }
}

/// Classifies an octocrab failure for the given upstream resource.
///
/// Responses the API answered with an error status map to
/// [`Error::UpstreamNotFound`]; everything else (connection, TLS, decoding)
/// maps to [`Error::Upstream`].
///
/// # Parameters
///
/// * `resource` - Upstream resource that was requested, used for diagnostics.
/// * `source` - Error reported by octocrab.
pub fn upstream_error(resource: &str, source: octocrab::Error,) -> Error
{
    let message = source.to_string();
    if matches!(source, octocrab::Error::GitHub { .. }) {
        Error::UpstreamNotFound {
            resource: resource.to_owned(),
            message,
        }
    } else {
        Error::Upstream {
            resource: resource.to_owned(),
            message,
        }
    }
}

/// Creates an [`Error::Server`] variant capturing the address and source.
///
/// # Parameters
///
/// * `host` - Interface the server was bound to.
/// * `port` - Port the server was bound to.
/// * `source` - I/O error reported by the operating system.
pub fn server_error(host: &str, port: u16, source: std::io::Error,) -> Error
{
    Error::Server {
        address: format!("{host}:{port}"),
        source,
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Runtime configuration for the badge server.
//!
//! Every option can be given as a command-line flag or through the matching
//! environment variable, which keeps container deployments flag-free.

use std::time::Duration;

use actix_web::http::Uri;
use clap::Parser;

use crate::{
    cache::{DEFAULT_CAPACITY, DEFAULT_TTL},
    error::Error,
    github::DEFAULT_API_URL,
};

/// Options accepted by the `gitpulse` binary.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use gitpulse::ServerConfig;
///
/// let config = ServerConfig::try_parse_from(["gitpulse", "--port", "3000"],)
///     .expect("valid arguments",);
/// assert_eq!(config.port, 3000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser,)]
#[command(name = "gitpulse", version, about = "Serve SVG badges for a GitHub user's latest project")]
pub struct ServerConfig
{
    /// Interface the HTTP server binds to.
    #[arg(long = "host", env = "GITPULSE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[arg(long = "port", env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Number of HTTP worker threads; defaults to the number of CPU cores.
    #[arg(long = "workers", env = "GITPULSE_WORKERS")]
    pub workers: Option<usize,>,

    /// Base URL of the GitHub REST API.
    #[arg(long = "github-api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Optional token raising the upstream rate limit; requests are anonymous
    /// without it.
    #[arg(long = "github-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String,>,

    /// Seconds a rendered badge stays fresh in the cache.
    #[arg(long = "cache-ttl-secs", env = "GITPULSE_CACHE_TTL", default_value_t = DEFAULT_TTL.as_secs())]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached badges.
    #[arg(long = "cache-capacity", env = "GITPULSE_CACHE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    /// Tracing filter directive, e.g. `info` or `gitpulse=debug`.
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig
{
    /// Checks invariants clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero port, zero cache capacity, zero
    /// workers, or an API URL that is not an absolute `http(s)` URL.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        if self.port == 0 {
            return Err(Error::config("port must be greater than zero",),);
        }
        if self.cache_capacity == 0 {
            return Err(Error::config("cache capacity must be greater than zero",),);
        }
        if self.workers == Some(0,) {
            return Err(Error::config("workers must be greater than zero",),);
        }
        if self.github_api_url.trim().is_empty() {
            return Err(Error::config("GitHub API URL must not be empty",),);
        }
        validate_api_url(&self.github_api_url,)?;

        Ok((),)
    }

    /// Returns the cache freshness window.
    pub fn cache_ttl(&self,) -> Duration
    {
        Duration::from_secs(self.cache_ttl_secs,)
    }

    /// Returns the configured token, ignoring blank values.
    pub fn github_token(&self,) -> Option<&str,>
    {
        self.github_token.as_deref().map(str::trim,).filter(|token| !token.is_empty(),)
    }

    /// Returns the `host:port` pair the server binds to.
    pub fn bind_address(&self,) -> (&str, u16,)
    {
        (self.host.as_str(), self.port,)
    }
}

fn validate_api_url(value: &str,) -> Result<(), Error,>
{
    let uri = value
        .parse::<Uri,>()
        .map_err(|error| Error::config(format!("invalid GitHub API URL {value:?}: {error}"),),)?;

    match (uri.scheme_str(), uri.authority(),) {
        (Some("http" | "https",), Some(_,),) => Ok((),),
        _ => Err(Error::config(format!("GitHub API URL {value:?} must be an absolute http(s) URL"),),),
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Tracing subscriber setup for the server binary.
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::Error;

/// Installs a global fmt subscriber filtered by `directives`.
///
/// # Errors
///
/// Returns [`Error::Config`] when the directives cannot be parsed or a global
/// subscriber is already installed.
pub fn init_tracing(directives: &str,) -> Result<(), Error,>
{
    let filter = build_filter(directives,)?;

    fmt()
        .with_env_filter(filter,)
        .with_target(true,)
        .try_init()
        .map_err(|e| Error::config(format!("failed to install tracing subscriber: {e}"),),)
}

fn build_filter(directives: &str,) -> Result<EnvFilter, Error,>
{
    EnvFilter::try_new(directives,)
        .map_err(|e| Error::config(format!("invalid log filter '{directives}': {e}"),),)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn build_filter_accepts_module_directives()
    {
        assert!(build_filter("info,gitpulse=debug").is_ok());
    }

    #[test]
    fn build_filter_rejects_malformed_directives()
    {
        let error = build_filter("gitpulse=notalevel",).expect_err("expected invalid filter",);
        assert!(matches!(error, Error::Config { .. }));
    }
}

//! Command-line entry point for the gitpulse badge server.
//!
//! Configuration comes from flags or the environment (see `--help`); the
//! process serves badges until it receives a shutdown signal.

use std::process;

use clap::Parser;
use gitpulse::{Error, ServerConfig, init_tracing, server};

/// Entry point that reports errors and sets the appropriate exit status.
#[actix_web::main]
async fn main()
{
    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Parses configuration, installs logging and runs the HTTP server.
///
/// # Errors
///
/// Propagates configuration, logging setup and server failures.
async fn run() -> Result<(), Error,>
{
    let config = ServerConfig::parse();
    init_tracing(&config.log_filter,)?;

    server::run(config,).await
}

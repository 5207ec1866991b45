//! Dynamically rendered SVG badges for GitHub profiles.
//!
//! The library resolves the most recently pushed repository of an account and
//! its dominant language through the GitHub REST API, renders the result as a
//! shields.io style badge, and caches rendered badges for a bounded time. The
//! [`server`] module exposes the whole flow as an `actix-web` handler that
//! always answers with an SVG image, including on failure.

mod badge;
mod cache;
mod color;
mod config;
mod error;
mod github;
pub mod server;
mod telemetry;

pub use badge::{
    BadgeContent, BadgeLayout, ERROR_COLOR, FALLBACK_SVG, LABEL_COLOR, render_badge,
    render_error_badge, segment_width,
};
pub use cache::{BadgeCache, CacheKey, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use color::{DEFAULT_COLOR, HexColor, is_valid_hex_color};
pub use config::ServerConfig;
pub use error::Error;
pub use github::{
    DEFAULT_API_URL, GitHubClient, Repository, UNKNOWN_LANGUAGE, select_primary_language,
};
pub use telemetry::init_tracing;

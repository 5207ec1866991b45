// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! HTTP surface of the badge service.
//!
//! A single GET handler resolves the query, consults the cache, performs the
//! two upstream lookups on a miss, renders the badge and stores it. Every
//! response, including failures, is an SVG image so embedding pages never
//! show a broken image.

use std::fmt;

use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, ResponseError,
    body::BoxBody,
    http::{StatusCode, header},
    web,
};
use tracing::{debug, error, info, warn};

use crate::{
    badge::{BadgeContent, render_badge, render_error_badge},
    cache::{BadgeCache, CacheKey},
    color::HexColor,
    config::ServerConfig,
    error::{self, Error},
    github::GitHubClient,
};

/// Content type of every response.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml; charset=utf-8";

/// Cache policy attached to successful badges.
pub const SUCCESS_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate";

/// Shared state injected into the handler.
pub struct AppState
{
    client: GitHubClient,
    cache:  BadgeCache,
}

impl AppState
{
    /// Bundles the upstream client and the badge cache.
    pub fn new(client: GitHubClient, cache: BadgeCache,) -> Self
    {
        Self {
            client,
            cache,
        }
    }

    /// Returns the badge cache.
    pub fn cache(&self,) -> &BadgeCache
    {
        &self.cache
    }
}

/// Badge parameters taken from the query string.
///
/// Repeated keys keep their first occurrence; unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq,)]
struct BadgeQuery
{
    username: Option<String,>,
    color:    Option<String,>,
}

impl BadgeQuery
{
    /// Decodes `query`, treating a malformed string as empty.
    fn parse(query: &str,) -> Self
    {
        let pairs = web::Query::<Vec<(String, String,),>,>::from_query(query,)
            .map(web::Query::into_inner,)
            .unwrap_or_default();

        let mut parsed = Self::default();
        for (key, value,) in pairs {
            let slot = match key.as_str() {
                "username" => &mut parsed.username,
                "color" => &mut parsed.color,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value,);
            }
        }
        parsed
    }
}

/// Request step a [`BadgeError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Stage
{
    /// The `username` parameter is absent or empty.
    MissingUsername,
    /// Most recently pushed repository lookup.
    Repository,
    /// Language breakdown lookup.
    Language,
    /// SVG rendering.
    Render,
}

impl Stage
{
    /// Message rendered into the error badge for this stage.
    pub fn public_message(self,) -> &'static str
    {
        match self {
            Self::MissingUsername => "Username is required",
            Self::Repository => "User or repo not found",
            Self::Language => "Could not get language",
            Self::Render => "Failed to generate SVG",
        }
    }

    /// HTTP status returned for failures in this stage.
    pub fn status_code(self,) -> StatusCode
    {
        match self {
            Self::MissingUsername => StatusCode::BAD_REQUEST,
            Self::Repository => StatusCode::NOT_FOUND,
            Self::Language | Self::Render => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Stage
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        let name = match self {
            Self::MissingUsername => "username validation",
            Self::Repository => "repository lookup",
            Self::Language => "language lookup",
            Self::Render => "badge rendering",
        };
        f.write_str(name,)
    }
}

/// Failure of a badge request, answered with an error badge.
///
/// The wrapped [`Error`] is kept for diagnostics only; clients see the fixed
/// message of the [`Stage`].
#[derive(Debug,)]
pub struct BadgeError
{
    /// Step that failed.
    pub stage:  Stage,
    /// Underlying cause.
    pub source: Error,
}

impl BadgeError
{
    /// Creates an error for `stage` caused by `source`.
    pub fn new(stage: Stage, source: Error,) -> Self
    {
        Self {
            stage,
            source,
        }
    }
}

impl fmt::Display for BadgeError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{} failed: {}", self.stage, self.source)
    }
}

impl std::error::Error for BadgeError
{
    fn source(&self,) -> Option<&(dyn std::error::Error + 'static),>
    {
        Some(&self.source,)
    }
}

impl ResponseError for BadgeError
{
    fn status_code(&self,) -> StatusCode
    {
        self.stage.status_code()
    }

    fn error_response(&self,) -> HttpResponse<BoxBody,>
    {
        HttpResponse::build(self.status_code(),)
            .insert_header((header::CONTENT_TYPE, SVG_CONTENT_TYPE,),)
            .body(render_error_badge(self.stage.public_message(),),)
    }
}

/// Serves the latest-project badge for the `username` query parameter.
///
/// The optional `color` parameter selects the message color and falls back
/// to `#007acc`. When a parameter is repeated its first value is used, and
/// malformed query strings are treated as empty.
///
/// # Errors
///
/// Returns a [`BadgeError`] whose response is an error badge with status
/// 400, 404 or 500 depending on the failing [`Stage`].
pub async fn last_project(
    request: HttpRequest,
    state: web::Data<AppState,>,
) -> Result<HttpResponse, BadgeError,>
{
    let query = BadgeQuery::parse(request.query_string(),);

    let username = query.username.filter(|username| !username.is_empty(),).ok_or_else(|| {
        BadgeError::new(Stage::MissingUsername, Error::invalid_input("username is required",),)
    },)?;
    let color = HexColor::resolve(query.color.as_deref(),);
    let key = CacheKey::new(username.as_str(), color.as_str(),);

    if let Some(svg,) = state.cache.get(&key,) {
        debug!(key = %key, "serving cached badge");
        return Ok(svg_response(svg,),);
    }
    debug!(key = %key, "badge cache miss");

    let repository = state
        .client
        .find_most_recent_repository(&username,)
        .await
        .map_err(|source| upstream_failure(Stage::Repository, &username, source,),)?;

    let language = state
        .client
        .find_primary_language(&username, &repository.name,)
        .await
        .map_err(|source| upstream_failure(Stage::Language, &username, source,),)?;

    let content = BadgeContent {
        owner:      &username,
        repository: &repository.name,
        message:    &language,
        color:      color.as_str(),
    };
    let svg = render_badge(&content,).map_err(|source| {
        error!(username = %username, error = %source, "failed to render badge");
        BadgeError::new(Stage::Render, source,)
    },)?;

    state.cache.put(key, svg.clone(),);

    Ok(svg_response(svg,),)
}

fn upstream_failure(stage: Stage, username: &str, source: Error,) -> BadgeError
{
    warn!(username = %username, stage = %stage, error = %source, "upstream lookup failed");
    BadgeError::new(stage, source,)
}

fn svg_response(svg: String,) -> HttpResponse
{
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, SVG_CONTENT_TYPE,),)
        .insert_header((header::CACHE_CONTROL, SUCCESS_CACHE_CONTROL,),)
        .body(svg,)
}

/// Registers the badge routes.
///
/// The badge is reachable both at `/api/last-project` and at `/`.
pub fn configure(cfg: &mut web::ServiceConfig,)
{
    cfg.route("/api/last-project", web::get().to(last_project,),)
        .route("/", web::get().to(last_project,),);
}

/// Builds the shared state from `config` and serves until shutdown.
///
/// # Errors
///
/// Returns [`Error::Config`] for invalid configuration and
/// [`Error::Server`] when binding or running the server fails.
pub async fn run(config: ServerConfig,) -> Result<(), Error,>
{
    config.validate()?;

    let client = GitHubClient::new(&config.github_api_url, config.github_token(),)?;
    let cache = BadgeCache::new(config.cache_ttl(), config.cache_capacity,);
    let state = web::Data::new(AppState::new(client, cache,),);

    let (host, port,) = config.bind_address();
    info!(
        host = %host,
        port,
        cache_ttl_secs = config.cache_ttl_secs,
        authenticated = config.github_token().is_some(),
        "starting badge server"
    );

    let mut server =
        HttpServer::new(move || App::new().app_data(state.clone(),).configure(configure,),);
    if let Some(workers,) = config.workers {
        server = server.workers(workers,);
    }

    server
        .bind((host, port,),)
        .map_err(|source| error::server_error(host, port, source,),)?
        .run()
        .await
        .map_err(|source| error::server_error(host, port, source,),)
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! GitHub REST lookups backing the badge.
//!
//! Two sequential calls are made per badge: the most recently pushed
//! repository of an account, then that repository's language breakdown.
//! Requests are issued once, without retries, through the shared octocrab
//! client.

use std::{collections::HashMap, fmt};

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Error};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Language reported when a repository has no language breakdown.
pub const UNKNOWN_LANGUAGE: &str = "N/A";

/// Repository summary returned by the repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize,)]
pub struct Repository
{
    /// Repository name without the owner prefix.
    pub name: String,
}

#[derive(Debug, Serialize,)]
struct ListParams
{
    sort:     &'static str,
    per_page: u8,
}

/// Thin wrapper around [`Octocrab`] exposing the two badge lookups.
#[derive(Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
}

impl fmt::Debug for GitHubClient
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.debug_struct("GitHubClient",).finish_non_exhaustive()
    }
}

impl GitHubClient
{
    /// Builds a client for `api_url`, authenticated with `token` when one is
    /// given and anonymous otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the URL is invalid or the client cannot
    /// be constructed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitpulse::{DEFAULT_API_URL, GitHubClient};
    ///
    /// # async fn example() -> Result<(), gitpulse::Error> {
    /// let client = GitHubClient::new(DEFAULT_API_URL, None,)?;
    /// let repository = client.find_most_recent_repository("octocat",).await?;
    /// let language = client.find_primary_language("octocat", &repository.name,).await?;
    /// println!("{} is written in {language}", repository.name);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_url: &str, token: Option<&str,>,) -> Result<Self, Error,>
    {
        let mut builder = Octocrab::builder()
            .base_uri(api_url,)
            .map_err(|e| Error::config(format!("invalid GitHub API URL '{api_url}': {e}"),),)?;
        if let Some(token,) = token {
            builder = builder.personal_token(token,);
        }

        let octocrab = builder
            .build()
            .map_err(|e| Error::config(format!("failed to initialize GitHub client: {e}"),),)?;

        Ok(Self::from_octocrab(octocrab,),)
    }

    /// Wraps an already configured octocrab instance.
    pub fn from_octocrab(octocrab: Octocrab,) -> Self
    {
        Self {
            octocrab,
        }
    }

    /// Returns the repository of `username` that was pushed to most recently.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInput`] when `username` cannot be a GitHub login.
    /// * [`Error::UpstreamNotFound`] when the API answers with an error status.
    /// * [`Error::UpstreamEmpty`] when the account has no repositories.
    /// * [`Error::Upstream`] on transport or decoding failures.
    pub async fn find_most_recent_repository(&self, username: &str,) -> Result<Repository, Error,>
    {
        ensure_path_segment(username,)?;

        let route = format!("/users/{username}/repos");
        let params = ListParams {
            sort: "pushed", per_page: 1,
        };
        debug!("Fetching most recently pushed repository for {}", username);

        let repositories: Vec<Repository,> = self
            .octocrab
            .get(&route, Some(&params,),)
            .await
            .map_err(|e| error::upstream_error(&route, e,),)?;

        repositories.into_iter().next().ok_or_else(|| Error::UpstreamEmpty {
            username: username.to_owned(),
        },)
    }

    /// Returns the dominant language of `username/repository` by byte count.
    ///
    /// An empty breakdown yields [`UNKNOWN_LANGUAGE`]; see
    /// [`select_primary_language`] for tie handling.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInput`] when either path segment is unusable.
    /// * [`Error::UpstreamNotFound`] when the API answers with an error status.
    /// * [`Error::Upstream`] on transport or decoding failures.
    pub async fn find_primary_language(
        &self,
        username: &str,
        repository: &str,
    ) -> Result<String, Error,>
    {
        ensure_path_segment(username,)?;
        ensure_path_segment(repository,)?;

        let route = format!("/repos/{username}/{repository}/languages");
        debug!("Fetching language breakdown for {}/{}", username, repository);

        let languages: HashMap<String, u64,> = self
            .octocrab
            .get(&route, None::<&(),>,)
            .await
            .map_err(|e| error::upstream_error(&route, e,),)?;

        Ok(select_primary_language(&languages,),)
    }
}

/// Picks the language with the greatest byte count.
///
/// Ties are broken by choosing the lexicographically smallest name so the
/// result does not depend on map iteration order. An empty map yields
/// [`UNKNOWN_LANGUAGE`].
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use gitpulse::select_primary_language;
///
/// let languages = HashMap::from([
///     ("Go".to_owned(), 100,),
///     ("Python".to_owned(), 250,),
///     ("C".to_owned(), 10,),
/// ],);
/// assert_eq!(select_primary_language(&languages), "Python");
/// assert_eq!(select_primary_language(&HashMap::new()), "N/A");
/// ```
pub fn select_primary_language(languages: &HashMap<String, u64,>,) -> String
{
    languages
        .iter()
        .max_by(|(left_name, left_bytes,), (right_name, right_bytes,)| {
            left_bytes.cmp(right_bytes,).then_with(|| right_name.cmp(left_name,),)
        },)
        .map_or_else(|| UNKNOWN_LANGUAGE.to_owned(), |(name, _,)| name.clone(),)
}

/// Rejects values that cannot be a GitHub login or repository name, so user
/// input is never spliced into an upstream path verbatim.
fn ensure_path_segment(value: &str,) -> Result<(), Error,>
{
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.'),);

    if valid {
        Ok((),)
    } else {
        Err(Error::invalid_input(format!("'{value}' is not a valid GitHub path segment"),),)
    }
}

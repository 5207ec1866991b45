// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Time-bounded cache of rendered badges.
//!
//! Entries are keyed by account and color. The lock is held only for the map
//! access itself, never across upstream calls or rendering, so concurrent
//! misses for the same key may both rebuild the badge; the last write wins.

use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use tracing::debug;

/// Default freshness window of a cached badge.
pub const DEFAULT_TTL: Duration = Duration::from_secs(8 * 60 * 60,);

/// Default upper bound on the number of cached badges.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Identifies a cached badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash,)]
pub struct CacheKey
{
    /// Account the badge was rendered for.
    pub username: String,
    /// Resolved message color, including the leading `#`.
    pub color:    String,
}

impl CacheKey
{
    /// Creates a key for the given account and color.
    pub fn new(username: impl Into<String,>, color: impl Into<String,>,) -> Self
    {
        Self {
            username: username.into(),
            color:    color.into(),
        }
    }
}

impl fmt::Display for CacheKey
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}:{}", self.username, self.color)
    }
}

#[derive(Debug, Clone,)]
struct CacheEntry
{
    svg:       String,
    stored_at: Instant,
}

/// Process-local badge cache with a fixed time-to-live and a size bound.
///
/// Stale entries are never served. They are swept when an insert finds the
/// cache full; if that frees nothing, the oldest entry is evicted.
#[derive(Debug,)]
pub struct BadgeCache
{
    entries:  Mutex<HashMap<CacheKey, CacheEntry,>,>,
    ttl:      Duration,
    capacity: usize,
}

impl BadgeCache
{
    /// Creates an empty cache. A `capacity` of zero is raised to one.
    pub fn new(ttl: Duration, capacity: usize,) -> Self
    {
        Self {
            entries: Mutex::new(HashMap::new(),),
            ttl,
            capacity: capacity.max(1,),
        }
    }

    /// Returns the freshness window of cached entries.
    pub fn ttl(&self,) -> Duration
    {
        self.ttl
    }

    /// Returns the cached badge for `key` if it is still fresh.
    pub fn get(&self, key: &CacheKey,) -> Option<String,>
    {
        let entries = self.lock();
        let entry = entries.get(key,)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.svg.clone(),)
        } else {
            debug!(key = %key, "cached badge expired");
            None
        }
    }

    /// Stores `svg` under `key`, replacing any previous entry.
    pub fn put(&self, key: CacheKey, svg: String,)
    {
        let mut entries = self.lock();
        if !entries.contains_key(&key,) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.stored_at.elapsed() < ttl,);

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry,)| entry.stored_at,)
                    .map(|(oldest, _,)| oldest.clone(),);
                if let Some(oldest,) = oldest {
                    debug!(key = %oldest, "evicting oldest cached badge");
                    entries.remove(&oldest,);
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                svg,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self,) -> usize
    {
        let mut entries = self.lock();
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl,);
        before - entries.len()
    }

    /// Returns the number of stored entries, fresh or not.
    pub fn len(&self,) -> usize
    {
        self.lock().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self,) -> bool
    {
        self.lock().is_empty()
    }

    // Every mutation is a single map call, so a poisoned map is still consistent.
    fn lock(&self,) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry,>,>
    {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner,)
    }
}

impl Default for BadgeCache
{
    fn default() -> Self
    {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY,)
    }
}

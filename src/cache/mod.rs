//! Result caching.
//!
//! The aggregation is memoized behind an injected [`ResultCache`] rather than
//! a process-wide singleton. Payloads are JSON strings, so any backend that can
//! store text with an optional expiry can hold them.

pub mod database;
pub mod memory;
pub mod policy;

pub use database::DatabaseCache;
pub use memory::MemoryCache;
pub use policy::{CachePolicy, results_cache_key};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache payload error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sea_orm::DbErr> for CacheError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Backend(err.to_string())
    }
}

/// How long a cached entry stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTtl {
    Forever,
    Expires(Duration),
}

/// Shared key-value store for computed payloads.
#[async_trait::async_trait]
pub trait ResultCache: Send + Sync {
    /// Returns the payload for `key` if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `payload` under `key` unless a live entry already exists.
    /// Returns whether the payload was stored.
    async fn add(&self, key: &str, payload: String, ttl: CacheTtl) -> Result<bool, CacheError>;

    /// Drops the entry for `key`, if any.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Removes every entry. Returns how many were dropped.
    async fn purge(&self) -> Result<u64, CacheError>;
}

/// Whether a lookup was answered from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

/// Returns the cached value for `key`, or computes, stores and returns it.
///
/// Concurrent callers may both miss and both compute; the first write is
/// kept along with its expiry. Cache failures are logged and never fail the
/// call.
pub async fn get_or_set<T, E, F, Fut>(
    cache: &dyn ResultCache,
    key: &str,
    ttl: CacheTtl,
    compute: F,
) -> Result<(T, CacheOutcome), E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match cache.get(key).await {
        Ok(Some(payload)) => match serde_json::from_str(&payload) {
            Ok(value) => {
                debug!(key, "Cache hit");
                return Ok((value, CacheOutcome::Hit));
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cache entry");
                if let Err(e) = cache.remove(key).await {
                    warn!(key, error = %e, "Failed to drop unreadable cache entry");
                }
            }
        },
        Ok(None) => debug!(key, "Cache miss"),
        Err(e) => warn!(key, error = %e, "Cache lookup failed, recomputing"),
    }

    let value = compute().await?;

    match serde_json::to_string(&value) {
        Ok(payload) => {
            match cache.add(key, payload, ttl).await {
                Ok(true) => {}
                Ok(false) => debug!(key, "Cache entry already stored by another caller"),
                Err(e) => warn!(key, error = %e, "Failed to store cache entry"),
            }
        }
        Err(e) => warn!(key, error = %e, "Failed to serialize cache entry"),
    }

    Ok((value, CacheOutcome::Miss))
}

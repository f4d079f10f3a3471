use super::{CacheError, CacheTtl, ResultCache};
use crate::db::Store;
use chrono::Utc;
use std::sync::Arc;

/// Cache backed by the `results_cache` table, shared by every process
/// using the same database.
#[derive(Clone)]
pub struct DatabaseCache {
    store: Arc<Store>,
}

impl DatabaseCache {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

fn backend(err: anyhow::Error) -> CacheError {
    CacheError::Backend(format!("{err:#}"))
}

#[async_trait::async_trait]
impl ResultCache for DatabaseCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get_cached_results(key).await.map_err(backend)
    }

    async fn add(&self, key: &str, payload: String, ttl: CacheTtl) -> Result<bool, CacheError> {
        let expires_at = match ttl {
            CacheTtl::Forever => None,
            CacheTtl::Expires(ttl) => {
                let ttl = chrono::Duration::from_std(ttl)
                    .map_err(|e| CacheError::Backend(e.to_string()))?;
                Some(Utc::now() + ttl)
            }
        };

        self.store
            .cache_results(key, payload, expires_at)
            .await
            .map_err(backend)
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove_cached_results(key).await.map_err(backend)
    }

    async fn purge(&self) -> Result<u64, CacheError> {
        self.store.purge_cached_results().await.map_err(backend)
    }
}

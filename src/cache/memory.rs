use super::{CacheError, CacheTtl, ResultCache};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::RwLock;

struct Entry {
    payload: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Process-local cache. Suitable for a single instance and for tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }
}

#[async_trait::async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.payload.clone()))
    }

    async fn add(&self, key: &str, payload: String, ttl: CacheTtl) -> Result<bool, CacheError> {
        let now = Instant::now();
        let expires_at = match ttl {
            CacheTtl::Forever => None,
            CacheTtl::Expires(duration) => Some(now + duration),
        };

        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.is_live(now));

        let mut stored = false;
        entries.entry(key.to_string()).or_insert_with(|| {
            stored = true;
            Entry {
                payload,
                expires_at,
            }
        });
        Ok(stored)
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn purge(&self) -> Result<u64, CacheError> {
        let mut entries = self.entries.write().await;
        let count = entries.len() as u64;
        entries.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn expired_entries_are_invisible() {
        let cache = MemoryCache::new();
        cache
            .add("gone", "1".to_string(), CacheTtl::Expires(Duration::ZERO))
            .await
            .unwrap();
        cache
            .add("kept", "2".to_string(), CacheTtl::Expires(Duration::from_secs(3600)))
            .await
            .unwrap();

        assert_eq!(cache.get("gone").await.unwrap(), None);
        assert_eq!(cache.get("kept").await.unwrap().as_deref(), Some("2"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn live_entries_are_not_replaced() {
        let cache = MemoryCache::new();
        let ttl = CacheTtl::Expires(Duration::from_secs(3600));

        assert!(cache.add("k", "first".into(), ttl).await.unwrap());
        assert!(!cache.add("k", "second".into(), CacheTtl::Forever).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("first"));

        cache.add("gone", "1".into(), CacheTtl::Expires(Duration::ZERO)).await.unwrap();
        assert!(cache.add("gone", "2".into(), ttl).await.unwrap());
        assert_eq!(cache.get("gone").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn purge_clears_everything() {
        let cache = MemoryCache::new();
        cache.add("a", "1".into(), CacheTtl::Forever).await.unwrap();
        cache.add("b", "2".into(), CacheTtl::Forever).await.unwrap();

        assert_eq!(cache.purge().await.unwrap(), 2);
        assert_eq!(cache.get("a").await.unwrap(), None);
    }
}

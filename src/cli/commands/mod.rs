mod index;
mod purge_cache;
mod results;
mod summary;
mod top;

pub use index::cmd_index;
pub use purge_cache::cmd_purge_cache;
pub use results::cmd_results;
pub use summary::cmd_summary;
pub use top::cmd_top;

use crate::cache::{DatabaseCache, MemoryCache, ResultCache};
use crate::config::{CacheBackend, Config};
use crate::db::Store;
use crate::services::SeaOrmResultsService;
use std::sync::Arc;

pub(crate) struct CommandContext {
    pub store: Arc<Store>,
    pub service: SeaOrmResultsService,
}

impl CommandContext {
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(
            Store::with_pool_options(
                &config.general.database_path,
                config.general.max_db_connections,
                config.general.min_db_connections,
            )
            .await?,
        );

        let cache: Arc<dyn ResultCache> = match config.cache.backend {
            CacheBackend::Database => Arc::new(DatabaseCache::new(store.clone())),
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
        };

        let service = SeaOrmResultsService::new(store.clone(), cache, config.results.clone());
        Ok(Self { store, service })
    }
}

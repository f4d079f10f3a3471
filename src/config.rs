use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub results: ResultsConfig,

    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    /// Used when `RUST_LOG` is not set.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/seasonsurvey.db".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    /// Part of every results cache key. Bump whenever the shape of the
    /// computed results changes.
    pub schema_version: u32,

    pub cache_base_ttl_hours: u64,

    /// Random spread applied to the base TTL in both directions.
    pub cache_jitter_hours: u64,

    /// Finished surveys at least this many seasons old never expire.
    pub old_survey_season_delta: i32,

    /// Minimum popularity, in percent, for an anime to appear in rankings.
    pub display_popularity_threshold: f64,

    /// Entries per result type in the index listing.
    pub top_results_count: usize,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            schema_version: 3,
            cache_base_ttl_hours: 8,
            cache_jitter_hours: 2,
            old_survey_season_delta: 2,
            display_popularity_threshold: 2.0,
            top_results_count: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Database,
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("seasonsurvey").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".seasonsurvey").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        let results = &self.results;

        if results.schema_version == 0 {
            anyhow::bail!("results.schema_version must be at least 1");
        }

        if results.cache_jitter_hours >= results.cache_base_ttl_hours {
            anyhow::bail!(
                "results.cache_jitter_hours ({}) must be smaller than cache_base_ttl_hours ({})",
                results.cache_jitter_hours,
                results.cache_base_ttl_hours
            );
        }

        if results.old_survey_season_delta < 0 {
            anyhow::bail!("results.old_survey_season_delta cannot be negative");
        }

        if !(results.display_popularity_threshold >= 0.0) {
            anyhow::bail!("results.display_popularity_threshold must be a non-negative number");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("general.min_db_connections cannot exceed max_db_connections");
        }

        Ok(())
    }
}

pub mod cache;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod results;
pub mod services;

use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use config::LogFormat;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries command output; logs go to stderr.
    match config.general.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;
    init_tracing(&config);

    match cli.command {
        Commands::Results {
            year,
            season,
            phase,
            json,
        } => cli::cmd_results(&config, year, season, &phase, json).await,

        Commands::Top {
            year,
            season,
            phase,
            result_type,
            count,
            ascending,
            json,
        } => {
            cli::cmd_top(
                &config,
                year,
                season,
                &phase,
                result_type,
                count,
                ascending,
                json,
            )
            .await
        }

        Commands::Index { year } => cli::cmd_index(&config, year).await,

        Commands::Summary {
            year,
            season,
            phase,
        } => cli::cmd_summary(&config, year, season, &phase).await,

        Commands::PurgeCache => cli::cmd_purge_cache(&config).await,
    }
}

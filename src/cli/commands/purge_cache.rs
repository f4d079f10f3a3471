//! Cache purge command handler

use super::CommandContext;
use crate::config::Config;
use crate::services::ResultsService;

pub async fn cmd_purge_cache(config: &Config) -> anyhow::Result<()> {
    let ctx = CommandContext::open(config).await?;
    let purged = ctx.service.purge_cache().await?;
    println!("Removed {purged} cached result set(s).");
    Ok(())
}

//! Survey index command handler

use super::CommandContext;
use crate::config::Config;
use crate::domain::AnimeId;
use crate::models::survey::SurveyState;
use crate::services::ResultsService;
use std::collections::HashMap;

pub async fn cmd_index(config: &Config, year: Option<i32>) -> anyhow::Result<()> {
    let ctx = CommandContext::open(config).await?;
    let entries = ctx.service.index(year).await?;

    if entries.is_empty() {
        println!("No surveys found.");
        return Ok(());
    }

    let ids: Vec<AnimeId> = entries
        .iter()
        .flat_map(|e| e.top.values().flatten().map(|r| r.anime_id))
        .collect();
    let names: HashMap<AnimeId, String> = ctx
        .store
        .get_anime_by_ids(&ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a.display_name()))
        .collect();

    for entry in &entries {
        let state = match entry.state {
            SurveyState::Upcoming => "upcoming",
            SurveyState::Ongoing => "open",
            SurveyState::Finished => "closed",
        };
        println!("{} [{}]", entry.survey, state);

        for (result_type, ranked) in &entry.top {
            let listed: Vec<String> = ranked
                .iter()
                .map(|r| {
                    let name = names
                        .get(&r.anime_id)
                        .map_or_else(|| format!("Anime #{}", r.anime_id), Clone::clone);
                    format!("{name} ({})", result_type.format(r.value))
                })
                .collect();
            if !listed.is_empty() {
                println!("  {}: {}", result_type.label(), listed.join(", "));
            }
        }
    }

    Ok(())
}

//! Top results command handler

use super::CommandContext;
use crate::config::Config;
use crate::domain::{AnimeId, Season, SortOrder};
use crate::results::{ResultType, WireRankedAnime};
use crate::services::ResultsService;
use std::collections::HashMap;

pub async fn cmd_top(
    config: &Config,
    year: i32,
    season: Season,
    phase: &str,
    result_type: ResultType,
    count: usize,
    ascending: bool,
    json: bool,
) -> anyhow::Result<()> {
    let ctx = CommandContext::open(config).await?;
    let survey = ctx.service.find_survey(year, season, phase).await?;

    let order = if ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    let ranked = ctx
        .service
        .top_results(&survey, result_type, count, order)
        .await?;

    if json {
        let wire: Vec<WireRankedAnime> = ranked.iter().map(WireRankedAnime::from).collect();
        println!("{}", serde_json::to_string_pretty(&wire)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!(
            "No anime above {}% popularity in {}.",
            config.results.display_popularity_threshold, survey
        );
        return Ok(());
    }

    let ids: Vec<AnimeId> = ranked.iter().map(|r| r.anime_id).collect();
    let names: HashMap<AnimeId, String> = ctx
        .store
        .get_anime_by_ids(&ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a.display_name()))
        .collect();

    println!("{survey}: {}", result_type.label());
    println!("{:-<70}", "");

    for (rank, entry) in ranked.iter().enumerate() {
        let name = names
            .get(&entry.anime_id)
            .cloned()
            .unwrap_or_else(|| format!("Anime #{}", entry.anime_id));
        println!(
            "{:>3}. {:<50} {:>12}",
            rank + 1,
            name,
            result_type.format(entry.value)
        );
    }

    Ok(())
}

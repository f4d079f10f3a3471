//! Survey results command handler

use super::CommandContext;
use crate::config::Config;
use crate::domain::{AnimeId, Season};
use crate::models::anime::Anime;
use crate::models::survey::Survey;
use crate::results::{AnimeResults, Metric, ResultType, WireSurveyResults};
use crate::services::ResultsService;
use std::collections::BTreeMap;

const COLUMNS: [ResultType; 4] = [
    ResultType::Popularity,
    ResultType::Score,
    ResultType::GenderPopularityRatio,
    ResultType::Underwatched,
];

pub async fn cmd_results(
    config: &Config,
    year: i32,
    season: Season,
    phase: &str,
    json: bool,
) -> anyhow::Result<()> {
    let ctx = CommandContext::open(config).await?;
    let survey = ctx.service.find_survey(year, season, phase).await?;
    let results = ctx.service.get_anime_results(&survey).await?;

    if json {
        let wire = WireSurveyResults::from(&results);
        println!("{}", serde_json::to_string_pretty(&wire)?);
        return Ok(());
    }

    let anime = ctx.service.get_survey_anime(&survey).await?;

    println!("{} ({:?})", survey, survey.state());
    println!("* continuing from an earlier season");
    println!("{:-<100}", "");

    print_category(&survey, "Series", &anime.series, &results.series);
    print_category(&survey, "Specials", &anime.special, &results.special);

    Ok(())
}

/// Display name, truncated to the column width. Continuing anime are marked
/// with a trailing `*`.
fn row_label(anime: &Anime, survey: &Survey) -> String {
    let marker = if anime.is_continuing(survey) { " *" } else { "" };
    let width = 38 - marker.len();

    let mut name = anime.display_name();
    if name.chars().count() > width {
        name = name.chars().take(width - 1).collect::<String>() + "…";
    }
    name + marker
}

fn print_category(
    survey: &Survey,
    title: &str,
    anime: &[Anime],
    results: &BTreeMap<AnimeId, AnimeResults>,
) {
    if anime.is_empty() {
        return;
    }

    println!("{title} ({})", anime.len());
    print!("{:<40}", "Anime");
    for column in COLUMNS {
        print!(" {:>16}", column.label());
    }
    println!();

    for entry in anime {
        print!("{:<40}", row_label(entry, survey));

        let values = results.get(&entry.id);
        for column in COLUMNS {
            let value = values
                .and_then(|v| v.get(&column))
                .copied()
                .unwrap_or(Metric::Undefined);
            print!(" {:>16}", column.format(value));
        }
        println!();
    }
    println!();
}

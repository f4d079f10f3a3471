//! Survey demographics command handler

use super::CommandContext;
use crate::config::Config;
use crate::domain::Season;
use crate::services::ResultsService;

pub async fn cmd_summary(
    config: &Config,
    year: i32,
    season: Season,
    phase: &str,
) -> anyhow::Result<()> {
    let ctx = CommandContext::open(config).await?;
    let survey = ctx.service.find_survey(year, season, phase).await?;
    let summary = ctx.service.survey_summary(&survey).await?;

    println!("{survey}");
    println!("{:-<40}", "");
    println!("Responses: {}", summary.response_count);
    println!();

    let gender = &summary.gender_distribution;
    println!("Gender");
    println!("  Male:   {:>5.1}%", gender.male);
    println!("  Female: {:>5.1}%", gender.female);
    println!("  Other:  {:>5.1}%", gender.other);
    println!();

    println!("Age");
    for (age, percent) in summary.age_distribution.iter().filter(|(_, p)| **p > 0.0) {
        println!("  {age:>3}: {percent:>5.1}%");
    }

    Ok(())
}

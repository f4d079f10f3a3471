//! Which anime belong to a survey.

use crate::models::anime::Anime;
use crate::models::survey::Survey;
use serde::{Deserialize, Serialize};

/// Anime included in one survey, split by category. `all` keeps the
/// candidates' order with series and specials interleaved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyAnime {
    pub all: Vec<Anime>,
    pub series: Vec<Anime>,
    pub special: Vec<Anime>,
}

impl SurveyAnime {
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Whether `anime` is shown in `survey`.
///
/// Series qualify whenever they are running during the survey's season.
/// Specials release irregularly, so each one is pinned to a single survey:
/// the pre-season survey of the season it starts in, or the post-season
/// survey of the season it finishes being subbed in.
#[must_use]
pub fn is_eligible(anime: &Anime, survey: &Survey) -> bool {
    let current = survey.year_season();
    if !anime.is_ongoing_at(current) {
        return false;
    }
    if anime.is_series() {
        return true;
    }

    let anchor = if survey.is_preseason {
        anime.start
    } else {
        anime.subbed
    };
    anchor == Some(current)
}

/// Filters `candidates` down to the survey's anime.
pub fn resolve_survey_anime<I>(survey: &Survey, candidates: I) -> SurveyAnime
where
    I: IntoIterator<Item = Anime>,
{
    let mut resolved = SurveyAnime::default();
    for anime in candidates {
        if !is_eligible(&anime, survey) {
            continue;
        }
        if anime.is_series() {
            resolved.series.push(anime.clone());
        } else {
            resolved.special.push(anime.clone());
        }
        resolved.all.push(anime);
    }
    resolved
}

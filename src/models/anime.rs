use crate::domain::{AnimeId, YearSeason};
use crate::models::survey::Survey;
use serde::{Deserialize, Serialize};

/// Release format of an anime, stored as a short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimeType {
    TvSeries,
    OnaSeries,
    BulkRelease,
    Movie,
    Ona,
    Ova,
    TvSpecial,
}

impl AnimeType {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TvSeries => "TV",
            Self::OnaSeries => "ONAS",
            Self::BulkRelease => "BULK",
            Self::Movie => "MV",
            Self::Ona => "ONA",
            Self::Ova => "OVA",
            Self::TvSpecial => "TVSP",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TV" => Some(Self::TvSeries),
            "ONAS" => Some(Self::OnaSeries),
            "BULK" => Some(Self::BulkRelease),
            "MV" => Some(Self::Movie),
            "ONA" => Some(Self::Ona),
            "OVA" => Some(Self::Ova),
            "TVSP" => Some(Self::TvSpecial),
            _ => None,
        }
    }

    /// Continuous-run formats. Everything else is a special.
    #[must_use]
    pub const fn is_series(self) -> bool {
        matches!(self, Self::TvSeries | Self::OnaSeries | Self::BulkRelease)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimeNameType {
    Japanese,
    English,
    Short,
}

impl AnimeNameType {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Japanese => "JP",
            Self::English => "EN",
            Self::Short => "SH",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "JP" => Some(Self::Japanese),
            "EN" => Some(Self::English),
            "SH" => Some(Self::Short),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeName {
    pub name: String,
    pub kind: AnimeNameType,
    pub official: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anime {
    pub id: AnimeId,
    pub anime_type: AnimeType,
    pub start: Option<YearSeason>,
    pub end: Option<YearSeason>,
    /// Season in which a special finished releasing with subtitles.
    pub subbed: Option<YearSeason>,
    #[serde(default)]
    pub names: Vec<AnimeName>,
}

impl Anime {
    #[must_use]
    pub const fn is_series(&self) -> bool {
        self.anime_type.is_series()
    }

    /// Whether the anime is running at `at`: started, and not yet ended
    /// (series) or not yet fully subbed (specials).
    #[must_use]
    pub fn is_ongoing_at(&self, at: YearSeason) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let finish = if self.is_series() { self.end } else { self.subbed };
        start <= at && finish.is_none_or(|finish| finish >= at)
    }

    /// Official names ordered Japanese, English, short.
    #[must_use]
    pub fn official_names(&self) -> Vec<&str> {
        let mut names: Vec<&AnimeName> = self.names.iter().filter(|n| n.official).collect();
        names.sort_by_key(|n| n.kind);
        names.into_iter().map(|n| n.name.as_str()).collect()
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.official_names()
            .first()
            .map_or_else(|| format!("Anime #{}", self.id), |name| (*name).to_string())
    }

    /// A continuing anime started before the survey's season.
    #[must_use]
    pub fn is_continuing(&self, survey: &Survey) -> bool {
        self.start != Some(survey.year_season())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Season;

    fn anime(anime_type: AnimeType) -> Anime {
        Anime {
            id: AnimeId::new(1),
            anime_type,
            start: Some(YearSeason::new(2021, Season::Winter)),
            end: None,
            subbed: None,
            names: Vec::new(),
        }
    }

    #[test]
    fn type_codes_round_trip() {
        for kind in [
            AnimeType::TvSeries,
            AnimeType::OnaSeries,
            AnimeType::BulkRelease,
            AnimeType::Movie,
            AnimeType::Ona,
            AnimeType::Ova,
            AnimeType::TvSpecial,
        ] {
            assert_eq!(AnimeType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(AnimeType::from_code("??"), None);
    }

    #[test]
    fn series_types() {
        assert!(AnimeType::TvSeries.is_series());
        assert!(AnimeType::BulkRelease.is_series());
        assert!(!AnimeType::Movie.is_series());
        assert!(!AnimeType::TvSpecial.is_series());
    }

    #[test]
    fn series_ongoing_uses_end_season() {
        let mut show = anime(AnimeType::TvSeries);
        show.end = Some(YearSeason::new(2021, Season::Spring));
        show.subbed = Some(YearSeason::new(2020, Season::Fall));

        assert!(!show.is_ongoing_at(YearSeason::new(2020, Season::Fall)));
        assert!(show.is_ongoing_at(YearSeason::new(2021, Season::Winter)));
        assert!(show.is_ongoing_at(YearSeason::new(2021, Season::Spring)));
        assert!(!show.is_ongoing_at(YearSeason::new(2021, Season::Summer)));
    }

    #[test]
    fn special_ongoing_uses_subbed_season() {
        let mut movie = anime(AnimeType::Movie);
        movie.end = Some(YearSeason::new(2021, Season::Winter));
        movie.subbed = Some(YearSeason::new(2021, Season::Summer));

        assert!(movie.is_ongoing_at(YearSeason::new(2021, Season::Summer)));
        assert!(!movie.is_ongoing_at(YearSeason::new(2021, Season::Fall)));
    }

    #[test]
    fn continuing_anime_started_in_an_earlier_season() {
        let survey = Survey {
            id: crate::domain::SurveyId::new(1),
            year: 2021,
            season: Season::Spring,
            is_preseason: false,
            opening_time: chrono::Utc::now(),
            closing_time: chrono::Utc::now(),
        };

        let mut show = anime(AnimeType::TvSeries);
        assert!(show.is_continuing(&survey));

        show.start = Some(YearSeason::new(2021, Season::Spring));
        assert!(!show.is_continuing(&survey));
    }

    #[test]
    fn missing_start_is_never_ongoing() {
        let mut show = anime(AnimeType::TvSeries);
        show.start = None;
        assert!(!show.is_ongoing_at(YearSeason::new(2030, Season::Winter)));
    }

    #[test]
    fn official_names_are_ordered_and_filtered() {
        let mut show = anime(AnimeType::TvSeries);
        show.names = vec![
            AnimeName { name: "Short".into(), kind: AnimeNameType::Short, official: true },
            AnimeName { name: "Fan".into(), kind: AnimeNameType::English, official: false },
            AnimeName { name: "English".into(), kind: AnimeNameType::English, official: true },
            AnimeName { name: "Nihongo".into(), kind: AnimeNameType::Japanese, official: true },
        ];

        assert_eq!(show.official_names(), vec!["Nihongo", "English", "Short"]);
        assert_eq!(show.display_name(), "Nihongo");
    }
}

//! Result types and how each one is displayed.

use super::metric::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every statistic computed per anime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Popularity,
    PopularityMale,
    PopularityFemale,
    GenderPopularityRatio,
    GenderPopularityRatioInv,
    Underwatched,
    Score,
    ScoreMale,
    ScoreFemale,
    GenderScoreDifference,
    GenderScoreDifferenceInv,
    Surprise,
    Disappointment,
    Age,
}

/// How a result value is rendered for people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    Percentage,
    GenderRatio,
    GenderRatioInv,
    Score,
    GenderScoreDiff,
    GenderScoreDiffInv,
    Age,
}

const FORMATTERS: [(ResultType, FormatterKind); 14] = [
    (ResultType::Popularity, FormatterKind::Percentage),
    (ResultType::PopularityMale, FormatterKind::Percentage),
    (ResultType::PopularityFemale, FormatterKind::Percentage),
    (ResultType::GenderPopularityRatio, FormatterKind::GenderRatio),
    (ResultType::GenderPopularityRatioInv, FormatterKind::GenderRatioInv),
    (ResultType::Underwatched, FormatterKind::Percentage),
    (ResultType::Score, FormatterKind::Score),
    (ResultType::ScoreMale, FormatterKind::Score),
    (ResultType::ScoreFemale, FormatterKind::Score),
    (ResultType::GenderScoreDifference, FormatterKind::GenderScoreDiff),
    (ResultType::GenderScoreDifferenceInv, FormatterKind::GenderScoreDiffInv),
    (ResultType::Surprise, FormatterKind::Percentage),
    (ResultType::Disappointment, FormatterKind::Percentage),
    (ResultType::Age, FormatterKind::Age),
];

impl ResultType {
    pub const ALL: [Self; 14] = [
        Self::Popularity,
        Self::PopularityMale,
        Self::PopularityFemale,
        Self::GenderPopularityRatio,
        Self::GenderPopularityRatioInv,
        Self::Underwatched,
        Self::Score,
        Self::ScoreMale,
        Self::ScoreFemale,
        Self::GenderScoreDifference,
        Self::GenderScoreDifferenceInv,
        Self::Surprise,
        Self::Disappointment,
        Self::Age,
    ];

    /// Column heading shown next to values of this type.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Popularity",
            Self::PopularityMale => "Popularity (Male)",
            Self::PopularityFemale => "Popularity (Female)",
            Self::GenderPopularityRatio => "Gender Ratio (♂:♀)",
            Self::GenderPopularityRatioInv => "Gender Ratio (♀:♂)",
            Self::Underwatched => "Underwatched",
            Self::Score => "Score",
            Self::ScoreMale => "Score (Male)",
            Self::ScoreFemale => "Score (Female)",
            Self::GenderScoreDifference => "Gender Score Difference (♂-♀)",
            Self::GenderScoreDifferenceInv => "Gender Score Difference (♀-♂)",
            Self::Surprise => "Surprise",
            Self::Disappointment => "Disappointment",
            Self::Age => "Average Viewer Age",
        }
    }

    /// Stable snake_case key, identical to the serialized form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::PopularityMale => "popularity_male",
            Self::PopularityFemale => "popularity_female",
            Self::GenderPopularityRatio => "gender_popularity_ratio",
            Self::GenderPopularityRatioInv => "gender_popularity_ratio_inv",
            Self::Underwatched => "underwatched",
            Self::Score => "score",
            Self::ScoreMale => "score_male",
            Self::ScoreFemale => "score_female",
            Self::GenderScoreDifference => "gender_score_difference",
            Self::GenderScoreDifferenceInv => "gender_score_difference_inv",
            Self::Surprise => "surprise",
            Self::Disappointment => "disappointment",
            Self::Age => "age",
        }
    }

    #[must_use]
    pub fn formatter(self) -> FormatterKind {
        FORMATTERS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or(FormatterKind::Score, |(_, formatter)| *formatter)
    }

    /// Renders a value of this type for display.
    #[must_use]
    pub fn format(self, value: Metric) -> String {
        self.formatter().format(value)
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| format!("unknown result type: {s}"))
    }
}

impl FormatterKind {
    #[must_use]
    pub fn format(self, value: Metric) -> String {
        let v = match value {
            Metric::Value(v) => v,
            Metric::Infinite => return "\u{221e}".to_string(),
            Metric::Undefined => return "N/A".to_string(),
        };

        match self {
            Self::Percentage => format!("{v:.1}%"),
            Self::Score | Self::Age => format!("{v:.2}"),
            Self::GenderRatio => directional_ratio(v, "M:F", "F:M"),
            Self::GenderRatioInv => directional_ratio(v, "F:M", "M:F"),
            Self::GenderScoreDiff => directional_difference(v, "M", "F"),
            Self::GenderScoreDiffInv => directional_difference(v, "F", "M"),
        }
    }
}

fn directional_ratio(v: f64, forward: &str, backward: &str) -> String {
    if v >= 1.0 {
        format!("{v:.2} {forward}")
    } else if v > 0.0 {
        format!("{:.2} {backward}", 1.0 / v)
    } else {
        format!("\u{221e} {backward}")
    }
}

fn directional_difference(v: f64, positive: &str, negative: &str) -> String {
    if v >= 0.0 {
        format!("{v:.2} {positive}")
    } else {
        format!("{:.2} {negative}", -v)
    }
}

//! Survey results engine.
//!
//! Pure computations over committed survey rows: eligibility, adjusted
//! response counts, per-anime statistics, ranking and demographics. Loading
//! rows and caching results live in [`crate::services`] and [`crate::cache`].

pub mod adjusted_count;
pub mod aggregate;
pub mod eligibility;
pub mod metric;
pub mod ranking;
pub mod result_type;
pub mod statistics;
pub mod summary;
pub mod wire;

pub use adjusted_count::{AdjustedCount, SequenceAnomaly, reconstruct};
pub use aggregate::{SurveyResults, SurveySnapshot, aggregate};
pub use eligibility::{SurveyAnime, is_eligible, resolve_survey_anime};
pub use metric::Metric;
pub use ranking::{RankedAnime, top_results};
pub use result_type::{FormatterKind, ResultType};
pub use statistics::{AnimeResults, compute_anime_results};
pub use summary::{SurveySummary, summarize};
pub use wire::{WireRankedAnime, WireSurveyResults};

//! Year-season arithmetic.
//!
//! A year and a season are packed into one ordered integer, `year * 10 + season`,
//! so that eligibility checks reduce to plain integer comparisons.

use super::Season;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SEASONS_PER_YEAR: i32 = 4;

/// Combined `(year, season)` value. Ordering follows chronology.
///
/// ```rust
/// use seasonsurvey::domain::{Season, YearSeason};
///
/// let value = YearSeason::new(2024, Season::Fall);
/// assert_eq!(value.value(), 20243);
/// assert_eq!(value.increment(), YearSeason::new(2025, Season::Winter));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearSeason(i32);

impl YearSeason {
    #[must_use]
    pub const fn new(year: i32, season: Season) -> Self {
        Self(year * 10 + season.index())
    }

    /// Combines raw stored columns. Returns `None` if either part is missing
    /// or the season is out of range.
    #[must_use]
    pub fn from_parts(year: Option<i32>, season: Option<i32>) -> Option<Self> {
        let season = Season::from_index(season?)?;
        Some(Self::new(year?, season))
    }

    /// Wraps an already-combined value.
    #[must_use]
    pub const fn from_value(value: i32) -> Self {
        Self(value)
    }

    /// Year-season that contains the given instant.
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        Self::new(now.year(), Season::from_month(now.month()))
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.0.div_euclid(10)
    }

    #[must_use]
    pub fn season(&self) -> Season {
        Season::from_index(self.0.rem_euclid(10)).unwrap_or(Season::Fall)
    }

    /// Moves one season forward, carrying into the next year after Fall.
    #[must_use]
    pub const fn increment(self) -> Self {
        let mut next = self.0 + 1;
        if next.rem_euclid(10) == SEASONS_PER_YEAR {
            next += 10 - SEASONS_PER_YEAR;
        }
        Self(next)
    }

    /// Number of season steps from `earlier` to `self` (negative if `earlier`
    /// is actually later).
    #[must_use]
    pub fn seasons_since(self, earlier: Self) -> i32 {
        self.ordinal() - earlier.ordinal()
    }

    fn ordinal(self) -> i32 {
        self.year() * SEASONS_PER_YEAR + self.season().index()
    }
}

impl fmt::Display for YearSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season(), self.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn combine_packs_year_and_season() {
        assert_eq!(YearSeason::new(2021, Season::Winter).value(), 20210);
        assert_eq!(YearSeason::new(2021, Season::Summer).value(), 20212);
        assert!(YearSeason::new(2020, Season::Fall) < YearSeason::new(2021, Season::Winter));
    }

    #[test]
    fn from_parts_requires_both_columns() {
        assert_eq!(
            YearSeason::from_parts(Some(2022), Some(1)),
            Some(YearSeason::new(2022, Season::Spring))
        );
        assert_eq!(YearSeason::from_parts(None, Some(1)), None);
        assert_eq!(YearSeason::from_parts(Some(2022), None), None);
        assert_eq!(YearSeason::from_parts(Some(2022), Some(7)), None);
    }

    #[test]
    fn increment_carries_into_next_year() {
        assert_eq!(YearSeason::from_value(20211).increment().value(), 20212);
        assert_eq!(YearSeason::from_value(20213).increment().value(), 20220);
    }

    #[test]
    fn seasons_since_counts_steps() {
        let fall = YearSeason::new(2020, Season::Fall);
        let spring = YearSeason::new(2021, Season::Spring);
        assert_eq!(spring.seasons_since(fall), 2);
        assert_eq!(fall.seasons_since(spring), -2);
        assert_eq!(spring.seasons_since(spring), 0);
        assert_eq!(
            YearSeason::new(2023, Season::Winter).seasons_since(YearSeason::new(2021, Season::Winter)),
            8
        );
    }

    #[test]
    fn containing_maps_month_to_season() {
        let now = Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap();
        assert_eq!(YearSeason::containing(now), YearSeason::new(2024, Season::Summer));
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(YearSeason::new(2019, Season::Spring).to_string(), "Spring 2019");
    }
}

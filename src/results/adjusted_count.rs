//! Adjusted response count reconstruction.
//!
//! A survey's anime list can change while responses are still coming in.
//! Responses submitted while an anime was missing from the list cannot contain
//! an opinion about it, so they are removed from that anime's popularity
//! denominator.
//!
//! The event log for one `(survey, anime)` pair is folded through a two-state
//! machine. The anime starts out [`Presence::Present`] unless its first event
//! is an addition, in which case it was absent from response 0. Every
//! `Absent -> Present` transition closes a blackout window; a window still
//! open at the end runs until the survey's final response count.
//!
//! Events that do not alternate (two additions or two removals in a row) are
//! ignored and reported as [`SequenceAnomaly`] values: the first removal of an
//! absence opens the window and the first addition closes it.

use crate::models::response::SurveyAdditionRemoval;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Present,
    Absent { since: u64 },
}

/// Something in the event log that could not be applied as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceAnomaly {
    /// An addition while the anime was already listed.
    RepeatedAddition { index: usize, response_count: i64 },
    /// A removal while the anime was already absent.
    RepeatedRemoval { index: usize, response_count: i64 },
    /// A snapshot below zero or above the survey's total; it was clamped.
    SnapshotOutOfRange { index: usize, response_count: i64 },
    /// An addition recorded at a smaller count than the removal it closes.
    NonMonotonic { index: usize, response_count: i64 },
    /// More watchers than responses the anime was listed for; popularity
    /// is capped at 100%.
    WatchersExceedScaled { watchers: u64, scaled: u64 },
}

/// Outcome of folding one anime's addition/removal log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustedCount {
    pub total: u64,
    /// Responses received while the anime was not on the list.
    pub blackout: u64,
    pub anomalies: Vec<SequenceAnomaly>,
}

impl AdjustedCount {
    /// Denominator for popularity: `total - blackout`, never below zero.
    #[must_use]
    pub const fn scaled(&self) -> u64 {
        self.total.saturating_sub(self.blackout)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Records an anomaly if the log leaves fewer responses than the anime
    /// has watchers. Returns `false` in that case.
    pub fn check_watchers(&mut self, watchers: u64) -> bool {
        let scaled = self.scaled();
        if watchers <= scaled {
            return true;
        }
        self.anomalies
            .push(SequenceAnomaly::WatchersExceedScaled { watchers, scaled });
        false
    }
}

/// Folds the addition/removal events of one anime into its adjusted count.
///
/// `events` may arrive in any order; they are applied by timestamp, then by
/// snapshot.
#[must_use]
pub fn reconstruct(events: &[SurveyAdditionRemoval], total: u64) -> AdjustedCount {
    let mut ordered: Vec<&SurveyAdditionRemoval> = events.iter().collect();
    ordered.sort_by_key(|e| (e.timestamp, e.response_count));

    let mut anomalies = Vec::new();
    let mut blackout = 0_u64;
    let mut state = match ordered.first() {
        Some(first) if first.is_addition => Presence::Absent { since: 0 },
        _ => Presence::Present,
    };

    for (index, event) in ordered.iter().enumerate() {
        let snapshot = clamp_snapshot(event.response_count, total).unwrap_or_else(|clamped| {
            anomalies.push(SequenceAnomaly::SnapshotOutOfRange {
                index,
                response_count: event.response_count,
            });
            clamped
        });

        state = match (state, event.is_addition) {
            (Presence::Absent { since }, true) => {
                if snapshot < since {
                    anomalies.push(SequenceAnomaly::NonMonotonic {
                        index,
                        response_count: event.response_count,
                    });
                }
                blackout += snapshot.saturating_sub(since);
                Presence::Present
            }
            (Presence::Present, false) => Presence::Absent { since: snapshot },
            (Presence::Present, true) => {
                anomalies.push(SequenceAnomaly::RepeatedAddition {
                    index,
                    response_count: event.response_count,
                });
                Presence::Present
            }
            (absent @ Presence::Absent { .. }, false) => {
                anomalies.push(SequenceAnomaly::RepeatedRemoval {
                    index,
                    response_count: event.response_count,
                });
                absent
            }
        };
    }

    if let Presence::Absent { since } = state {
        blackout += total.saturating_sub(since);
    }

    let adjusted = AdjustedCount {
        total,
        blackout: blackout.min(total),
        anomalies,
    };

    if let Some(first) = ordered.first().filter(|_| !adjusted.is_clean()) {
        warn!(
            survey_id = %first.survey_id,
            anime_id = %first.anime_id,
            anomalies = ?adjusted.anomalies,
            "Addition/removal log does not alternate cleanly; adjusted count may be approximate"
        );
    }

    adjusted
}

/// `Ok` for an in-range snapshot, `Err(clamped)` otherwise.
fn clamp_snapshot(response_count: i64, total: u64) -> Result<u64, u64> {
    match u64::try_from(response_count) {
        Ok(count) if count <= total => Ok(count),
        Ok(_) => Err(total),
        Err(_) => Err(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnimeId, SurveyId};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap()
    }

    fn events(pairs: &[(bool, i64)]) -> Vec<SurveyAdditionRemoval> {
        pairs.iter()
            .enumerate()
            .map(|(i, (is_addition, response_count))| SurveyAdditionRemoval {
                survey_id: SurveyId::new(1),
                anime_id: AnimeId::new(7),
                is_addition: *is_addition,
                response_count: *response_count,
                timestamp: base_time() + Duration::minutes(i64::try_from(i).unwrap()),
            })
            .collect()
    }

    #[test]
    fn no_events_means_no_blackout() {
        let adjusted = reconstruct(&[], 100);
        assert_eq!(adjusted.blackout, 0);
        assert_eq!(adjusted.scaled(), 100);
        assert!(adjusted.is_clean());
    }

    #[test]
    fn late_addition_excludes_earlier_responses() {
        let adjusted = reconstruct(&events(&[(true, 40)]), 100);
        assert_eq!(adjusted.blackout, 40);
        assert_eq!(adjusted.scaled(), 60);
    }

    #[test]
    fn addition_then_removal_excludes_both_ends() {
        let adjusted = reconstruct(&events(&[(true, 10), (false, 70)]), 100);
        assert_eq!(adjusted.blackout, 40);
        assert_eq!(adjusted.scaled(), 60);
        assert!(adjusted.is_clean());
    }

    #[test]
    fn removal_and_readdition_excludes_the_gap() {
        let adjusted = reconstruct(&events(&[(false, 20), (true, 35)]), 100);
        assert_eq!(adjusted.blackout, 15);
        assert_eq!(adjusted.scaled(), 85);
    }

    #[test]
    fn removal_without_readdition_runs_to_the_end() {
        let adjusted = reconstruct(&events(&[(false, 80)]), 100);
        assert_eq!(adjusted.blackout, 20);
    }

    #[test]
    fn multiple_windows_accumulate() {
        let adjusted = reconstruct(
            &events(&[(true, 5), (false, 30), (true, 50), (false, 90)]),
            100,
        );
        assert_eq!(adjusted.blackout, 5 + 20 + 10);
        assert_eq!(adjusted.scaled(), 65);
    }

    #[test]
    fn events_are_applied_in_timestamp_order() {
        let mut log = events(&[(true, 10), (false, 70)]);
        log.reverse();
        assert_eq!(reconstruct(&log, 100).blackout, 40);
    }

    #[test]
    fn repeated_addition_is_ignored_and_reported() {
        let adjusted = reconstruct(&events(&[(true, 10), (true, 30)]), 100);
        assert_eq!(adjusted.blackout, 10);
        assert_eq!(
            adjusted.anomalies,
            vec![SequenceAnomaly::RepeatedAddition {
                index: 1,
                response_count: 30
            }]
        );
    }

    #[test]
    fn repeated_removal_keeps_the_first_window_start() {
        let adjusted = reconstruct(&events(&[(false, 20), (false, 40), (true, 60)]), 100);
        assert_eq!(adjusted.blackout, 40);
        assert_eq!(adjusted.anomalies.len(), 1);
    }

    #[test]
    fn out_of_range_snapshots_are_clamped() {
        let adjusted = reconstruct(&events(&[(true, 150)]), 100);
        assert_eq!(adjusted.blackout, 100);
        assert_eq!(adjusted.scaled(), 0);
        assert!(matches!(
            adjusted.anomalies[0],
            SequenceAnomaly::SnapshotOutOfRange { .. }
        ));

        let negative = reconstruct(&events(&[(false, -5)]), 100);
        assert_eq!(negative.blackout, 100);
    }

    #[test]
    fn scaled_count_stays_within_total() {
        for log in [
            events(&[(true, 90), (false, 10)]),
            events(&[(false, 0), (true, 100)]),
            events(&[(true, 100), (true, 100), (false, 100)]),
        ] {
            let adjusted = reconstruct(&log, 100);
            assert!(adjusted.scaled() <= 100);
            assert!(adjusted.blackout <= 100);
        }
    }

    #[test]
    fn more_watchers_than_listed_responses_is_reported() {
        let mut adjusted = reconstruct(&events(&[(true, 90)]), 100);
        assert!(adjusted.check_watchers(10));
        assert!(adjusted.is_clean());

        assert!(!adjusted.check_watchers(20));
        assert_eq!(
            adjusted.anomalies,
            vec![SequenceAnomaly::WatchersExceedScaled {
                watchers: 20,
                scaled: 10
            }]
        );
    }
}

//! Respondent demographics for a survey.

use crate::models::response::{Gender, Response};
use serde::Serialize;
use std::collections::BTreeMap;

pub const MIN_AGE: i32 = 5;
pub const MAX_AGE: i32 = 80;

/// Share of gender-answering respondents per gender, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenderDistribution {
    pub male: f64,
    pub female: f64,
    pub other: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySummary {
    pub response_count: u64,
    pub gender_distribution: GenderDistribution,
    /// Percent of respondents per age from `MIN_AGE` to `MAX_AGE`.
    pub age_distribution: BTreeMap<i32, f64>,
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    count as f64 / total.max(1) as f64 * 100.0
}

#[must_use]
pub fn gender_distribution(responses: &[Response]) -> GenderDistribution {
    let answered: Vec<Gender> = responses.iter().filter_map(|r| r.gender).collect();
    let share = |gender: Gender| {
        percent(
            answered.iter().filter(|g| **g == gender).count(),
            answered.len(),
        )
    };

    GenderDistribution {
        male: share(Gender::Male),
        female: share(Gender::Female),
        other: share(Gender::Other),
    }
}

/// Ages outside `MIN_AGE..=MAX_AGE` still count towards the denominator
/// when positive, matching how many respondents gave an age at all.
#[must_use]
pub fn age_distribution(responses: &[Response]) -> BTreeMap<i32, f64> {
    let ages: Vec<i32> = responses
        .iter()
        .filter_map(|r| r.age)
        .filter(|age| *age > 0)
        .collect();

    (MIN_AGE..=MAX_AGE)
        .map(|age| {
            let count = ages.iter().filter(|a| **a == age).count();
            (age, percent(count, ages.len()))
        })
        .collect()
}

#[must_use]
pub fn summarize(responses: &[Response]) -> SurveySummary {
    SurveySummary {
        response_count: responses.len() as u64,
        gender_distribution: gender_distribution(responses),
        age_distribution: age_distribution(responses),
    }
}

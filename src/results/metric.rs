//! Result values that may be statistically undefined.
//!
//! Every division and average in the engine produces a [`Metric`] instead of a
//! raw `f64`, so an undefined value can never leak into later arithmetic as a
//! silent NaN. IEEE sentinels only appear at the serialization boundary.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Value(f64),
    /// Positive numerator over an empty population.
    Infinite,
    Undefined,
}

impl Metric {
    /// Normalizes a raw float: NaN becomes `Undefined`, +/-inf becomes `Infinite`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self::Undefined
        } else if value.is_infinite() {
            Self::Infinite
        } else {
            Self::Value(value)
        }
    }

    #[must_use]
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::from_f64)
    }

    /// `a / b` when `b > 0`, otherwise undefined.
    #[must_use]
    pub fn div0(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 {
            Self::from_f64(numerator / denominator)
        } else {
            Self::Undefined
        }
    }

    /// `count / total * 100`, undefined for an empty total.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentage(count: u64, total: u64) -> Self {
        Self::div0(count as f64, total as f64).scale(100.0)
    }

    /// Ratio of two derived metrics. A positive value over an exact zero is
    /// `Infinite`; anything involving an undefined side, or zero over zero,
    /// is `Undefined`.
    #[must_use]
    pub fn ratio(numerator: Self, denominator: Self) -> Self {
        match (numerator, denominator) {
            (Self::Value(a), Self::Value(b)) if b > 0.0 => Self::from_f64(a / b),
            (Self::Value(a), Self::Value(b)) if b == 0.0 && a > 0.0 => Self::Infinite,
            (Self::Infinite, Self::Value(b)) if b >= 0.0 => Self::Infinite,
            (Self::Value(a), Self::Infinite) if a >= 0.0 => Self::Value(0.0),
            _ => Self::Undefined,
        }
    }

    /// `a - b`, defined only when both sides are present and positive.
    #[must_use]
    pub fn difference(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Value(a), Self::Value(b)) if a > 0.0 && b > 0.0 => Self::from_f64(a - b),
            _ => Self::Undefined,
        }
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        match self {
            Self::Value(v) => Self::from_f64(v * factor),
            other => other,
        }
    }

    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// IEEE representation: `NaN` for undefined, `+inf` for infinite.
    #[must_use]
    pub const fn to_f64(self) -> f64 {
        match self {
            Self::Value(v) => v,
            Self::Infinite => f64::INFINITY,
            Self::Undefined => f64::NAN,
        }
    }

    /// Orders finite values by magnitude and puts every non-finite value
    /// after all finite ones, regardless of direction.
    #[must_use]
    pub fn rank_cmp(self, other: Self, descending: bool) -> Ordering {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => {
                if descending {
                    b.total_cmp(&a)
                } else {
                    a.total_cmp(&b)
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        Self::from_option(value)
    }
}

/// Mean of the given values, `None` for an empty input.
#[allow(clippy::cast_precision_loss)]
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0_i64, 0_u64), |(sum, count), v| (sum + i64::from(v), count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

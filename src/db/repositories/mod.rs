pub mod addition_removal;
pub mod anime;
pub mod cache;
pub mod response;
pub mod survey;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Timestamps are stored as RFC3339 text.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp in database: {raw}"))
}

pub(crate) fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339()
}

//! Per-day charge counts for a neighbourhood (`GET /stats`).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Look-back window used when the caller does not pick one, in days.
pub const DEFAULT_STATS_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyCharges {
    /// Kept as emitted; see [`DailyCharges::date`].
    pub day: String,
    pub charges_count: i64,
}

impl DailyCharges {
    /// Parses `day`, which is either `YYYY-MM-DD` or an HTTP-date such as
    /// `Wed, 01 May 2024 00:00:00 GMT`.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.day, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc2822(&self.day)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

/// Sum of `charges_count` over a stats series.
pub fn total_charges(days: &[DailyCharges]) -> i64 {
    days.iter().map(|d| d.charges_count).sum()
}

//! Calendar-date normalization for traffic timestamps.
//!
//! The traffic endpoint reports each day as a UTC instant. Reporting happens
//! in a fixed UTC+9 offset, so a day's key is the calendar date of the
//! instant shifted by that offset. No timezone database is consulted.

use crate::Result;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;

/// Fixed reporting offset relative to UTC, in seconds (UTC+9).
const REPORTING_OFFSET_SECS: i64 = 9 * 3600;

/// Convert a UTC ISO-8601 timestamp into a `YYYY-MM-DD` date key in the
/// fixed reporting offset.
pub fn local_date_key(timestamp: &str) -> Result<String> {
    let instant: DateTime<Utc> = timestamp
        .parse::<DateTime<Utc>>()
        .into_app_err_with(|| format!("parsing traffic timestamp '{timestamp}'"))?;

    let shifted = instant + chrono::Duration::seconds(REPORTING_OFFSET_SECS);
    Ok(shifted.format("%Y-%m-%d").to_string())
}

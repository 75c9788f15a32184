//! Traffic collection and aggregation
//!
//! This module implements the pipeline that turns the raw GitHub traffic-views
//! response into durable statistics:
//!
//! - [`Client`] fetches the per-day view counts for a repository.
//! - [`date`] normalizes each UTC timestamp into a local calendar-date key.
//! - [`HistoryStore`] merges the fetched days into the unbounded on-disk
//!   history, keyed by date with last-write-wins semantics.
//! - [`window`] selects the most-recent days for the short-term snapshot.
//! - [`aggregate`] recomputes the daily/weekly/monthly series from the full
//!   history on every run.
//!
//! The history file is the only durable state. Everything else is derived and
//! overwritten wholesale each run.

pub mod aggregate;
mod client;
pub mod date;
mod history;
mod window;

pub use aggregate::Series;
pub use client::{Client, GITHUB_API_BASE, TrafficView};
pub use history::{History, HistoryStore, TrafficRecord, write_records};
pub use window::recent;

use crate::Result;

/// Convert fetched views into date-keyed records ready for merging.
///
/// A single malformed timestamp fails the whole conversion; there is no
/// per-record skip-and-continue.
pub fn normalize_views(views: impl IntoIterator<Item = TrafficView>) -> Result<Vec<(String, TrafficRecord)>> {
    views
        .into_iter()
        .map(|v| {
            let key = date::local_date_key(&v.timestamp)?;
            Ok((
                key,
                TrafficRecord {
                    count: v.count,
                    uniques: v.uniques,
                },
            ))
        })
        .collect()
}

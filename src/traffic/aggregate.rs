//! Daily, weekly, and monthly rollups over the traffic history.
//!
//! Buckets are fully recomputed from the history on every run; there is no
//! incremental bucket state. All rollups sum `uniques` (not `count`), and
//! every output is sorted ascending by period key, so a fixed history always
//! produces the same series.
//!
//! Weekly bucketing restarts at the start of each calendar month: day `d`
//! of a month falls in week `((d - 1) / 7) + 1`, keyed `YYYY-MM-Wk`. Weeks
//! are therefore not continuous across month boundaries and the last week of
//! a month can be shorter than 7 days.

use crate::Result;
use crate::traffic::history::History;
use chrono::{Datelike, NaiveDate};
use ohno::IntoAppError;
use std::collections::BTreeMap;

/// An ordered label/value sequence ready for rendering.
///
/// Labels and values are parallel: `values[i]` is the total for `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl Series {
    /// True when the series has no data points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn from_totals(totals: BTreeMap<String, u64>) -> Self {
        let mut labels = Vec::with_capacity(totals.len());
        let mut values = Vec::with_capacity(totals.len());
        for (label, value) in totals {
            labels.push(label);
            values.push(value);
        }
        Self { labels, values }
    }
}

/// One data point per date, ascending, with its `uniques` value.
#[must_use]
pub fn daily(history: &History) -> Series {
    let mut labels = Vec::with_capacity(history.len());
    let mut values = Vec::with_capacity(history.len());
    for (date, record) in history {
        labels.push(date.clone());
        values.push(record.uniques);
    }
    Series { labels, values }
}

/// Sum of `uniques` per month-restart week (`YYYY-MM-Wk`), ascending.
pub fn weekly(history: &History) -> Result<Series> {
    let mut totals = BTreeMap::new();
    for (date, record) in history {
        let day = parse_date_key(date)?;
        let week = (day.day() - 1) / 7 + 1;
        let key = format!("{:04}-{:02}-W{week}", day.year(), day.month());
        *totals.entry(key).or_insert(0) += record.uniques;
    }
    Ok(Series::from_totals(totals))
}

/// Sum of `uniques` per calendar month (`YYYY-MM`), ascending.
pub fn monthly(history: &History) -> Result<Series> {
    let mut totals = BTreeMap::new();
    for (date, record) in history {
        let day = parse_date_key(date)?;
        let key = format!("{:04}-{:02}", day.year(), day.month());
        *totals.entry(key).or_insert(0) += record.uniques;
    }
    Ok(Series::from_totals(totals))
}

fn parse_date_key(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").into_app_err_with(|| format!("parsing history date key '{date}'"))
}

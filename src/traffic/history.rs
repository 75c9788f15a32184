//! Durable, date-keyed traffic history.
//!
//! [`HistoryStore`] wraps the on-disk history file so that callers don't need
//! to thread the path through every load/merge/save call. The history is the
//! sole durable entity; it only ever grows, one record per calendar date,
//! with last-write-wins semantics when a date is fetched again.
//!
//! The store performs no locking. Concurrent invocations against the same
//! file race; an external scheduler is expected to serialize runs.

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

const LOG_TARGET: &str = "   history";

/// A single day's traffic as reported by the views endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrafficRecord {
    /// Raw page views for the day.
    pub count: u64,

    /// Distinct visitors for the day.
    pub uniques: u64,
}

/// Date-keyed (`YYYY-MM-DD`) traffic records.
///
/// A `BTreeMap` keeps the keys sorted, which makes the serialized form
/// deterministic: saving identical logical content always produces
/// byte-identical output.
pub type History = BTreeMap<String, TrafficRecord>;

/// The on-disk history file plus its in-memory contents.
#[derive(Debug)]
pub struct HistoryStore {
    path: Utf8PathBuf,
    entries: History,
}

impl HistoryStore {
    /// Load the history from disk.
    ///
    /// A missing, empty, or malformed file yields an empty history rather
    /// than an error, so a first run and a corrupted file both start clean.
    #[must_use]
    pub fn load(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        let entries = read_records(&path);
        Self { path, entries }
    }

    /// Returns the date-keyed records currently held by the store.
    #[must_use]
    pub fn entries(&self) -> &History {
        &self.entries
    }

    /// Insert or overwrite one record per incoming date key.
    ///
    /// Re-merging the same records is a no-op; two fetches that disagree on
    /// a date resolve to whichever was merged last.
    pub fn merge(&mut self, records: impl IntoIterator<Item = (String, TrafficRecord)>) {
        for (date, record) in records {
            let _ = self.entries.insert(date, record);
        }
    }

    /// Persist the full history to its file.
    pub fn save(&self) -> Result<()> {
        log::debug!(target: LOG_TARGET, "saving {} record(s) to {}", self.entries.len(), self.path);
        write_records(&self.path, &self.entries)
    }
}

fn read_records(path: &Utf8Path) -> History {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "no usable history at {path}: {e:#}");
            return History::new();
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(records) => records,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "resetting malformed history at {path}: {e:#}");
            History::new()
        }
    }
}

/// Write date-keyed records as pretty-printed JSON with sorted keys,
/// creating any missing containing directory first.
pub fn write_records(path: &Utf8Path, records: &History) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{parent}'"))?;
    }

    let file = File::create(path).into_app_err_with(|| format!("creating '{path}'"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).into_app_err_with(|| format!("writing '{path}'"))?;
    writer.flush().into_app_err_with(|| format!("flushing '{path}'"))?;
    Ok(())
}

//! Short-term window selection over the traffic history.

use crate::traffic::history::History;

/// The `n` most-recently-dated entries of a history, values unmodified.
///
/// Lexicographic order over `YYYY-MM-DD` keys is chronological order, so the
/// greatest keys are the latest dates. A history with fewer than `n` entries
/// comes back whole.
#[must_use]
pub fn recent(history: &History, n: usize) -> History {
    history.iter().rev().take(n).map(|(date, record)| (date.clone(), *record)).collect()
}

//! State visit history tracking.
//!
//! History starts with the seed (initial) state and grows by one entry per
//! accepted transition. It is cleared and reseeded on every reset.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single visited state and when it was entered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry<S> {
    /// The state that was entered
    pub state: S,
    /// When the state was entered
    pub entered_at: DateTime<Utc>,
}

/// Ordered history of visited states since the last reset.
///
/// # Example
///
/// ```rust
/// use esm::core::StateHistory;
///
/// let mut history = StateHistory::seeded("start");
/// history.push("middle");
/// history.push("end");
///
/// assert_eq!(history.len(), 3);
/// assert_eq!(history.path(), vec![&"start", &"middle", &"end"]);
/// assert_eq!(history.tail(2), Some(vec!["middle", "end"]));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S> {
    entries: Vec<HistoryEntry<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history, as held by a machine that was never reset.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a history holding only the seed state.
    pub fn seeded(seed: S) -> Self {
        let mut history = Self::new();
        history.push(seed);
        history
    }

    /// Record entry into `state`.
    pub fn push(&mut self, state: S) {
        self.entries.push(HistoryEntry {
            state,
            entered_at: Utc::now(),
        });
    }

    /// Drop every entry and start over from `seed`.
    pub fn reseed(&mut self, seed: S) {
        self.entries.clear();
        self.push(seed);
    }

    /// States in visit order, seed first.
    pub fn path(&self) -> Vec<&S> {
        self.entries.iter().map(|entry| &entry.state).collect()
    }

    /// The last `k` visited states, or `None` if fewer than `k` were visited.
    pub fn tail(&self, k: usize) -> Option<Vec<S>> {
        let start = self.entries.len().checked_sub(k)?;
        Some(
            self.entries[start..]
                .iter()
                .map(|entry| entry.state.clone())
                .collect(),
        )
    }

    /// Check whether the last `pattern.len()` states equal `pattern`.
    pub fn ends_with(&self, pattern: &[S]) -> bool {
        let Some(start) = self.entries.len().checked_sub(pattern.len()) else {
            return false;
        };
        self.entries[start..]
            .iter()
            .zip(pattern)
            .all(|(entry, state)| entry.state == *state)
    }

    /// The most recently entered state.
    pub fn last(&self) -> Option<&S> {
        self.entries.last().map(|entry| &entry.state)
    }

    /// Number of entries, seed included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time between the seed entry and the latest entry.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            let duration = last.entered_at.signed_duration_since(first.entered_at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All entries in visit order.
    pub fn entries(&self) -> &[HistoryEntry<S>] {
        &self.entries
    }
}

//! Results and snapshots reported by the state machine.

use crate::callbacks::{CallbackFailure, Dispatch};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

/// Outcome of an accepted transition.
///
/// The transition itself always completed; `failures` lists every callback
/// or sequence handler that returned an error while it was dispatched.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionReport<S> {
    pub from: S,
    pub to: S,
    /// Number of sequence patterns completed by this transition
    pub sequences_matched: usize,
    pub failures: Vec<CallbackFailure>,
}

impl<S> TransitionReport<S> {
    /// Check that no handler failed (pure)
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Point-in-time view of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot<S> {
    /// Current state, `None` until the first reset
    pub current: Option<S>,
    /// State the next reset will move to
    pub initial: Option<S>,
    /// Whether the graph changed since the last reset
    pub modified: bool,
    pub history_len: usize,
    pub edge_count: usize,
}

/// Flatten accumulated handler failures into a list.
pub(crate) fn failures(dispatch: Dispatch) -> Vec<CallbackFailure> {
    match dispatch {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

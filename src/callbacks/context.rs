//! Context provided to transition callbacks.

use crate::core::State;

/// The transition a callback is being invoked for.
///
/// Entry, exit and transition callbacks all receive the same context, so an
/// entry callback can tell which state the machine came from.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionContext<S: State> {
    pub from: S,
    pub to: S,
}

impl<S: State> TransitionContext<S> {
    pub fn new(from: S, to: S) -> Self {
        Self { from, to }
    }

    /// Check whether this transition loops back to the same state (pure)
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

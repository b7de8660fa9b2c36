//! Sequence patterns over the history of visited states.
//!
//! A pattern is a non-empty list of states. After each append to the
//! history, every pattern is compared against the most recent states; when
//! the history ends with the pattern, its handler runs once with the
//! matched states. Matches may overlap: `[A, A]` matches twice in
//! `[A, A, A]`, once on each of the last two appends.

use crate::callbacks::{
    CallbackFailure, CallbackResult, Dispatch, HandlerKind, HandlerRegistration, Registered,
};
use crate::core::{State, StateHistory};
use crate::machine::MachineError;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Shared handler invoked with the matched states.
pub type SequenceHandler<S> = Arc<dyn Fn(&[S]) -> CallbackResult + Send + Sync>;

struct SequencePattern<S: State> {
    states: Vec<S>,
    handler: SequenceHandler<S>,
}

/// Result of evaluating every pattern after an append.
pub struct Evaluation {
    /// Number of patterns whose handlers ran
    pub matched: usize,
    /// Collected handler failures
    pub outcome: Dispatch,
}

/// Registered patterns plus the running history they are matched against.
///
/// # Example
///
/// ```rust
/// use esm::sequence::SequenceMatcher;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
///
/// let mut matcher = SequenceMatcher::new();
/// matcher
///     .on_sequence(vec!["a", "b"], move |_| {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     })
///     .unwrap();
///
/// matcher.reset("a");
/// matcher.append("b");
/// let evaluation = matcher.evaluate();
///
/// assert_eq!(evaluation.matched, 1);
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct SequenceMatcher<S: State> {
    patterns: Vec<Registered<SequencePattern<S>>>,
    history: StateHistory<S>,
}

impl<S: State> Default for SequenceMatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> SequenceMatcher<S> {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Register `handler` to run whenever `pattern` has just been traversed.
    ///
    /// Value-identical patterns are still independent registrations.
    /// Fails with [`MachineError::EmptySequence`] for an empty pattern.
    pub fn on_sequence<I, F>(
        &mut self,
        pattern: I,
        handler: F,
    ) -> Result<HandlerRegistration, MachineError>
    where
        I: IntoIterator<Item = S>,
        F: Fn(&[S]) -> CallbackResult + Send + Sync + 'static,
    {
        let states: Vec<S> = pattern.into_iter().collect();
        if states.is_empty() {
            return Err(MachineError::EmptySequence);
        }

        let entry = Registered::new(
            HandlerKind::Sequence,
            SequencePattern {
                states,
                handler: Arc::new(handler),
            },
        );
        let registration = entry.registration.clone();
        self.patterns.push(entry);
        Ok(registration)
    }

    /// Record entry into `state`.
    pub fn append(&mut self, state: S) {
        self.history.push(state);
    }

    /// Run the handler of every live pattern the history currently ends with.
    pub fn evaluate(&mut self) -> Evaluation {
        self.patterns.retain(Registered::is_live);

        let mut matched = 0;
        let mut checks: Vec<Dispatch> = Vec::new();
        for entry in &self.patterns {
            let pattern = &entry.handler;
            if !entry.is_live() || !self.history.ends_with(&pattern.states) {
                continue;
            }
            matched += 1;
            checks.push(match (pattern.handler)(&pattern.states) {
                Ok(()) => Validation::success(()),
                Err(error) => {
                    let during = format!("sequence {:?}", pattern.states);
                    let failure = CallbackFailure::new(&entry.registration, during, error);
                    failure.log();
                    Validation::fail(failure)
                }
            });
        }

        if matched > 0 {
            tracing::debug!(matched, "Sequence patterns matched");
        }

        Evaluation {
            matched,
            outcome: Validation::all_vec(checks).map(|_| ()),
        }
    }

    /// Clear the history and reseed it with `initial`.
    pub fn reset(&mut self, initial: S) {
        self.history.reseed(initial);
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Number of live patterns.
    pub fn count(&self) -> usize {
        self.patterns.iter().filter(|p| p.is_live()).count()
    }
}

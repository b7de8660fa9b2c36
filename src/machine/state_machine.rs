//! State machine that executes transitions over a mutable graph.

use super::error::MachineError;
use super::report::{self, MachineSnapshot, TransitionReport};
use crate::callbacks::{
    Callback, CallbackRegistry, CallbackResult, HandlerKind, HandlerRegistration,
    TransitionContext,
};
use crate::core::{State, StateGraph, StateHistory};
use crate::sequence::SequenceMatcher;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Generic finite-state machine with lifecycle callbacks.
///
/// # Example
///
/// ```rust
/// use esm::StateMachine;
///
/// let mut machine = StateMachine::new();
/// machine.set_initial_state("locked");
/// machine.add_transitions("locked", ["unlocked"]);
/// machine.add_transitions("unlocked", ["locked", "open"]);
/// machine.reset();
///
/// machine.on_entering("open", |ctx| {
///     println!("opened from {:?}", ctx.from);
///     Ok(())
/// });
///
/// machine.fire_transition("unlocked").unwrap();
/// let report = machine.fire_transition("open").unwrap();
///
/// assert!(report.is_clean());
/// assert_eq!(machine.current_state(), Some(&"open"));
/// assert!(machine.fire_transition("locked").is_err());
/// ```
pub struct StateMachine<S: State> {
    graph: StateGraph<S>,
    callbacks: CallbackRegistry<S>,
    sequences: SequenceMatcher<S>,
    current: Option<S>,
    initial: Option<S>,
    modified: bool,
}

impl<S: State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateMachine<S> {
    /// Create an uninitialized machine with no edges.
    pub fn new() -> Self {
        Self {
            graph: StateGraph::new(),
            callbacks: CallbackRegistry::new(),
            sequences: SequenceMatcher::new(),
            current: None,
            initial: None,
            modified: false,
        }
    }

    /// Create a machine that is already reset into `initial`.
    pub fn with_initial(initial: S) -> Self {
        let mut machine = Self::new();
        machine.set_initial_state(initial);
        machine.reset();
        machine
    }

    /// Set the state the next [`reset`](Self::reset) moves to.
    ///
    /// The current state is left untouched.
    pub fn set_initial_state(&mut self, state: S) {
        self.initial = Some(state);
    }

    // Handler registration

    /// Run `callback` whenever `state` is entered, via any transition.
    pub fn on_entering<F>(&mut self, state: S, callback: F) -> HandlerRegistration
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.callbacks.on_entering(state, callback)
    }

    /// Run `callback` whenever `state` is exited, via any transition.
    pub fn on_exiting<F>(&mut self, state: S, callback: F) -> HandlerRegistration
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.callbacks.on_exiting(state, callback)
    }

    /// Run `callback` whenever the edge `from -> to` is taken.
    ///
    /// The edge does not need to exist yet, and registering does not
    /// create it.
    pub fn on_transition<F>(&mut self, from: S, to: S, callback: F) -> HandlerRegistration
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.callbacks.on_transition(from, to, callback)
    }

    /// Run `handler` whenever the states in `pattern` have just been
    /// traversed in order.
    pub fn on_sequence<I, F>(
        &mut self,
        pattern: I,
        handler: F,
    ) -> Result<HandlerRegistration, MachineError>
    where
        I: IntoIterator<Item = S>,
        F: Fn(&[S]) -> CallbackResult + Send + Sync + 'static,
    {
        self.sequences.on_sequence(pattern, handler)
    }

    // Graph mutation. Every change resets an initialized machine.

    /// Add the edge `from -> to`.
    ///
    /// Returns `true` iff the edge was new; the machine is then modified
    /// and, if initialized, reset.
    pub fn add_transition(&mut self, from: S, to: S) -> bool {
        let changed = self.graph.add_transition(from, to);
        self.after_mutation(changed)
    }

    /// Add an edge from `from` to each state in `to`.
    ///
    /// Returns `true` iff at least one edge was new.
    pub fn add_transitions<I>(&mut self, from: S, to: I) -> bool
    where
        I: IntoIterator<Item = S>,
    {
        let changed = self.graph.add_transitions(from, to);
        self.after_mutation(changed)
    }

    /// Add the edge `from -> to` and attach `callback` to it.
    ///
    /// Attaching a callback to an edge that already exists does not count
    /// as a modification and does not reset the machine.
    pub fn add_transition_with<F>(
        &mut self,
        from: S,
        to: S,
        callback: F,
    ) -> (bool, HandlerRegistration)
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        let registration = self
            .callbacks
            .on_transition(from.clone(), to.clone(), callback);
        let changed = self.graph.add_transition(from, to);
        (self.after_mutation(changed), registration)
    }

    /// Add an edge from `from` to each state in `to`, attaching `callback`
    /// to every listed edge.
    ///
    /// Each edge gets its own registration, returned in the order of `to`.
    /// Returns `true` iff at least one edge was new.
    pub fn add_transitions_with<I, F>(
        &mut self,
        from: S,
        to: I,
        callback: F,
    ) -> (bool, Vec<HandlerRegistration>)
    where
        I: IntoIterator<Item = S>,
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        let targets: Vec<S> = to.into_iter().collect();
        let callback: Callback<S> = Arc::new(callback);

        let registrations = targets
            .iter()
            .map(|target| {
                self.callbacks
                    .attach(from.clone(), target.clone(), Arc::clone(&callback))
            })
            .collect();

        let changed = self.graph.add_transitions(from, targets);
        (self.after_mutation(changed), registrations)
    }

    /// Connect every state in `states` to every other one, plus self-loops
    /// when `include_self` is set.
    ///
    /// Returns `true` iff at least one edge was new.
    pub fn add_all_transitions(&mut self, states: &[S], include_self: bool) -> bool {
        let changed = self.graph.add_all_transitions(states, include_self);
        self.after_mutation(changed)
    }

    /// Remove the edges from `from` to each state in `to`.
    ///
    /// Missing edges are ignored. Returns `true` iff at least one edge was
    /// removed.
    pub fn remove_transitions<'a, I>(&mut self, from: &S, to: I) -> bool
    where
        I: IntoIterator<Item = &'a S>,
    {
        let changed = self.graph.remove_transitions(from, to);
        self.after_mutation(changed)
    }

    fn after_mutation(&mut self, changed: bool) -> bool {
        if changed {
            self.modified = true;
            if self.is_ready() {
                tracing::debug!("Transition graph modified, resetting");
                self.reset();
            }
        }
        changed
    }

    // Execution

    /// Move to the pending initial state and restart history from it.
    ///
    /// Clears the modification flag. Sequence patterns consisting of just
    /// the initial state fire here; their failures are logged. Without a
    /// pending initial state this is a no-op and the machine stays
    /// uninitialized.
    pub fn reset(&mut self) {
        let Some(initial) = self.initial.clone() else {
            tracing::debug!("Reset skipped, no initial state set");
            return;
        };

        tracing::debug!(initial = ?initial, "Resetting state machine");
        self.current = Some(initial.clone());
        self.modified = false;
        self.sequences.reset(initial);

        // Handler failures are logged where they are caught.
        self.sequences.evaluate();
    }

    /// Take the edge from the current state to `to`.
    ///
    /// Fails without changing anything if the machine is uninitialized or
    /// the edge does not exist. Otherwise runs exit, transition and entry
    /// callbacks, commits `to`, appends it to the history and evaluates
    /// sequence patterns. Handler failures do not undo the transition;
    /// they are returned in the report.
    pub fn fire_transition(&mut self, to: S) -> Result<TransitionReport<S>, MachineError> {
        let from = self.current.clone().ok_or(MachineError::Uninitialized)?;

        if !self.graph.can_transition(&from, &to) {
            return Err(MachineError::InvalidTransition {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            });
        }

        let dispatched = self.callbacks.dispatch(&from, &to);

        self.current = Some(to.clone());
        self.sequences.append(to.clone());
        let evaluation = self.sequences.evaluate();

        let outcome = Validation::all_vec(vec![dispatched, evaluation.outcome]);
        let failures = report::failures(outcome.map(|_| ()));

        tracing::debug!(
            from = ?from,
            to = ?to,
            failures = failures.len(),
            "Transition accepted"
        );

        Ok(TransitionReport {
            from,
            to,
            sequences_matched: evaluation.matched,
            failures,
        })
    }

    // Queries (pure)

    /// Current state, `None` until the first reset.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn initial_state(&self) -> Option<&S> {
        self.initial.as_ref()
    }

    /// Check whether the machine has been reset at least once.
    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    /// Check whether the graph changed since the last reset.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn can_transition(&self, from: &S, to: &S) -> bool {
        self.graph.can_transition(from, to)
    }

    /// States reachable from `from` in one step, in no particular order.
    pub fn transitions_from<'a>(&'a self, from: &S) -> impl Iterator<Item = &'a S> + 'a {
        self.graph.transitions_from(from)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &StateGraph<S> {
        &self.graph
    }

    /// States visited since the last reset, initial state first.
    pub fn history(&self) -> &StateHistory<S> {
        self.sequences.history()
    }

    /// Number of live handlers of the given kind.
    pub fn handler_count(&self, kind: HandlerKind) -> usize {
        match kind {
            HandlerKind::Sequence => self.sequences.count(),
            _ => self.callbacks.count(kind),
        }
    }

    pub fn snapshot(&self) -> MachineSnapshot<S> {
        MachineSnapshot {
            current: self.current.clone(),
            initial: self.initial.clone(),
            modified: self.modified,
            history_len: self.history().len(),
            edge_count: self.graph.edge_count(),
        }
    }
}

//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::callbacks::{CallbackResult, TransitionContext};
use crate::core::State;
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// Handlers registered through the builder live as long as the machine;
/// register on the built machine instead when a removable
/// [`HandlerRegistration`](crate::callbacks::HandlerRegistration) is needed.
///
/// # Example
///
/// ```rust
/// use esm::builder::StateMachineBuilder;
///
/// let machine = StateMachineBuilder::new()
///     .initial("draft")
///     .transition("draft", "review")
///     .transitions("review", ["draft", "published"])
///     .on_entering("published", |_| Ok(()))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), Some(&"draft"));
/// assert_eq!(machine.edge_count(), 3);
/// ```
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    machine: StateMachine<S>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            machine: StateMachine::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add the edge `from -> to`.
    pub fn transition(mut self, from: S, to: S) -> Self {
        self.machine.add_transition(from, to);
        self
    }

    /// Add an edge from `from` to each state in `to`.
    pub fn transitions<I>(mut self, from: S, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.machine.add_transitions(from, to);
        self
    }

    /// Add edges from `from` to each state in `to`, with a callback on each.
    pub fn transitions_with<I, F>(mut self, from: S, to: I, callback: F) -> Self
    where
        I: IntoIterator<Item = S>,
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.machine.add_transitions_with(from, to, callback);
        self
    }

    /// Connect every listed state to every other one.
    pub fn all_transitions(mut self, states: &[S], include_self: bool) -> Self {
        self.machine.add_all_transitions(states, include_self);
        self
    }

    pub fn on_entering<F>(mut self, state: S, callback: F) -> Self
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.machine.on_entering(state, callback);
        self
    }

    pub fn on_exiting<F>(mut self, state: S, callback: F) -> Self
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.machine.on_exiting(state, callback);
        self
    }

    pub fn on_transition<F>(mut self, from: S, to: S, callback: F) -> Self
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.machine.on_transition(from, to, callback);
        self
    }

    /// Register a sequence pattern.
    /// Returns an error if the pattern is empty.
    pub fn on_sequence<I, F>(mut self, pattern: I, handler: F) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        F: Fn(&[S]) -> CallbackResult + Send + Sync + 'static,
    {
        self.machine.on_sequence(pattern, handler)?;
        Ok(self)
    }

    /// Build the state machine, reset into the initial state.
    /// Returns an error if no initial state was set.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = self.machine;
        machine.set_initial_state(initial);
        machine.reset();

        Ok(machine)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

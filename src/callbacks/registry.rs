//! Ordered callback collections and phase dispatch.

use super::context::TransitionContext;
use super::error::{CallbackFailure, CallbackResult};
use super::registration::{HandlerKind, HandlerRegistration, Registered};
use crate::core::State;
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Shared callback invoked with the transition being dispatched.
pub type Callback<S> = Arc<dyn Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync>;

/// Outcome of dispatching handlers: success, or every failure collected.
pub type Dispatch = Validation<(), NonEmptyVec<CallbackFailure>>;

type Entries<S> = Vec<Registered<Callback<S>>>;

/// Entry, exit and transition callbacks, each kept in registration order.
pub struct CallbackRegistry<S: State> {
    entering: HashMap<S, Entries<S>>,
    exiting: HashMap<S, Entries<S>>,
    transitions: HashMap<S, HashMap<S, Entries<S>>>,
}

impl<S: State> Default for CallbackRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> CallbackRegistry<S> {
    pub fn new() -> Self {
        Self {
            entering: HashMap::new(),
            exiting: HashMap::new(),
            transitions: HashMap::new(),
        }
    }

    /// Run `callback` whenever `state` is entered, via any transition.
    pub fn on_entering<F>(&mut self, state: S, callback: F) -> HandlerRegistration
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        push(
            self.entering.entry(state).or_default(),
            HandlerKind::Entering,
            Arc::new(callback),
        )
    }

    /// Run `callback` whenever `state` is exited, via any transition.
    pub fn on_exiting<F>(&mut self, state: S, callback: F) -> HandlerRegistration
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        push(
            self.exiting.entry(state).or_default(),
            HandlerKind::Exiting,
            Arc::new(callback),
        )
    }

    /// Run `callback` whenever the edge `from -> to` is taken.
    pub fn on_transition<F>(&mut self, from: S, to: S, callback: F) -> HandlerRegistration
    where
        F: Fn(&TransitionContext<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.attach(from, to, Arc::new(callback))
    }

    /// Attach an already shared callback to the edge `from -> to`.
    ///
    /// Each attachment is a separate registration.
    pub fn attach(&mut self, from: S, to: S, callback: Callback<S>) -> HandlerRegistration {
        push(
            self.transitions
                .entry(from)
                .or_default()
                .entry(to)
                .or_default(),
            HandlerKind::Transition,
            callback,
        )
    }

    /// Invoke the callbacks for `from -> to`.
    ///
    /// Phases run in a fixed order: exit callbacks of `from`, transition
    /// callbacks of the edge, then entry callbacks of `to`. Within a phase
    /// callbacks run in registration order. A failing callback does not stop
    /// the others; every failure is collected into the returned `Dispatch`.
    pub fn dispatch(&mut self, from: &S, to: &S) -> Dispatch {
        self.prune();

        let context = TransitionContext::new(from.clone(), to.clone());
        let phases = [
            self.exiting.get(from),
            self.transitions.get(from).and_then(|targets| targets.get(to)),
            self.entering.get(to),
        ];

        // Liveness is checked per entry so a callback can remove a later one.
        let checks: Vec<Dispatch> = phases
            .into_iter()
            .flatten()
            .flatten()
            .filter(|entry| entry.is_live())
            .map(|entry| invoke(entry, &context))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Number of live handlers of the given kind.
    pub fn count(&self, kind: HandlerKind) -> usize {
        let live = |entries: &Entries<S>| entries.iter().filter(|e| e.is_live()).count();
        match kind {
            HandlerKind::Entering => self.entering.values().map(live).sum(),
            HandlerKind::Exiting => self.exiting.values().map(live).sum(),
            HandlerKind::Transition => self
                .transitions
                .values()
                .flat_map(HashMap::values)
                .map(live)
                .sum(),
            HandlerKind::Sequence => 0,
        }
    }

    /// Drop removed entries. Survivors keep their relative order.
    pub fn prune(&mut self) {
        for entries in self.entering.values_mut() {
            entries.retain(Registered::is_live);
        }
        for entries in self.exiting.values_mut() {
            entries.retain(Registered::is_live);
        }
        for targets in self.transitions.values_mut() {
            for entries in targets.values_mut() {
                entries.retain(Registered::is_live);
            }
            targets.retain(|_, entries| !entries.is_empty());
        }
        self.entering.retain(|_, entries| !entries.is_empty());
        self.exiting.retain(|_, entries| !entries.is_empty());
        self.transitions.retain(|_, targets| !targets.is_empty());
    }
}

fn push<S: State>(
    entries: &mut Entries<S>,
    kind: HandlerKind,
    callback: Callback<S>,
) -> HandlerRegistration {
    let entry = Registered::new(kind, callback);
    let registration = entry.registration.clone();
    entries.push(entry);
    registration
}

fn invoke<S: State>(entry: &Registered<Callback<S>>, context: &TransitionContext<S>) -> Dispatch {
    match (entry.handler)(context) {
        Ok(()) => Validation::success(()),
        Err(error) => {
            let during = format!("{:?} -> {:?}", context.from, context.to);
            let failure = CallbackFailure::new(&entry.registration, during, error);
            failure.log();
            Validation::fail(failure)
        }
    }
}

//! Directed transition graph.
//!
//! The graph is a set of explicitly added edges, stored as a mapping from
//! each source state to the set of states reachable from it in one step.

use super::state::State;
use std::collections::{HashMap, HashSet};

/// Set of permitted transitions between states.
///
/// Every mutating method reports whether the graph actually changed, so
/// the owning machine can decide whether a reset is due.
///
/// # Example
///
/// ```rust
/// use esm::core::StateGraph;
///
/// let mut graph = StateGraph::new();
///
/// assert!(graph.add_transition("idle", "busy"));
/// assert!(!graph.add_transition("idle", "busy"));
/// assert!(graph.can_transition(&"idle", &"busy"));
/// assert!(!graph.can_transition(&"busy", &"idle"));
/// ```
#[derive(Clone, Debug)]
pub struct StateGraph<S: State> {
    edges: HashMap<S, HashSet<S>>,
}

impl<S: State> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateGraph<S> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Insert the edge `from -> to`.
    ///
    /// Returns `true` iff the edge did not exist before.
    pub fn add_transition(&mut self, from: S, to: S) -> bool {
        self.edges.entry(from).or_default().insert(to)
    }

    /// Insert an edge from `from` to every state in `to`.
    ///
    /// Returns `true` iff at least one edge was newly created.
    pub fn add_transitions<I>(&mut self, from: S, to: I) -> bool
    where
        I: IntoIterator<Item = S>,
    {
        let mut to = to.into_iter().peekable();
        if to.peek().is_none() {
            return false;
        }

        let targets = self.edges.entry(from).or_default();
        let mut changed = false;
        for state in to {
            changed |= targets.insert(state);
        }
        changed
    }

    /// Connect every state in `states` to every other one.
    ///
    /// With `include_self`, each state also gets a loop back to itself.
    /// Returns `true` iff at least one edge was newly created.
    ///
    /// ```rust
    /// use esm::core::StateGraph;
    ///
    /// let mut graph = StateGraph::new();
    /// graph.add_all_transitions(&[1, 2, 3], false);
    /// assert_eq!(graph.edge_count(), 6);
    ///
    /// graph.add_all_transitions(&[1, 2, 3], true);
    /// assert_eq!(graph.edge_count(), 9);
    /// ```
    pub fn add_all_transitions(&mut self, states: &[S], include_self: bool) -> bool {
        let mut changed = false;
        for from in states {
            let targets = states
                .iter()
                .filter(|to| include_self || *to != from)
                .cloned();
            changed |= self.add_transitions(from.clone(), targets);
        }
        changed
    }

    /// Remove the edges from `from` to any of the states in `to`.
    ///
    /// Edges that do not exist are ignored. Returns `true` iff at least
    /// one edge was removed.
    pub fn remove_transitions<'a, I>(&mut self, from: &S, to: I) -> bool
    where
        I: IntoIterator<Item = &'a S>,
    {
        let Some(targets) = self.edges.get_mut(from) else {
            return false;
        };

        let mut changed = false;
        for state in to {
            changed |= targets.remove(state);
        }

        if targets.is_empty() {
            self.edges.remove(from);
        }
        changed
    }

    /// Check whether the edge `from -> to` exists (pure).
    pub fn can_transition(&self, from: &S, to: &S) -> bool {
        self.edges
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// States reachable from `from` in one step, in no particular order.
    pub fn transitions_from<'a>(&'a self, from: &S) -> impl Iterator<Item = &'a S> + 'a {
        self.edges.get(from).into_iter().flatten()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    /// Check whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.values().all(HashSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
        Failed,
    }

    #[test]
    fn new_graph_is_empty() {
        let graph: StateGraph<TestState> = StateGraph::new();

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.can_transition(&TestState::Initial, &TestState::Processing));
    }

    #[test]
    fn add_transition_is_idempotent() {
        let mut graph = StateGraph::new();

        assert!(graph.add_transition(TestState::Initial, TestState::Processing));
        assert!(!graph.add_transition(TestState::Initial, TestState::Processing));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn edges_are_directed() {
        let mut graph = StateGraph::new();
        graph.add_transition(TestState::Initial, TestState::Processing);

        assert!(graph.can_transition(&TestState::Initial, &TestState::Processing));
        assert!(!graph.can_transition(&TestState::Processing, &TestState::Initial));
    }

    #[test]
    fn add_transitions_reports_any_new_edge() {
        let mut graph = StateGraph::new();
        graph.add_transition(TestState::Processing, TestState::Complete);

        let changed = graph.add_transitions(
            TestState::Processing,
            [TestState::Complete, TestState::Failed],
        );
        assert!(changed);
        assert_eq!(graph.edge_count(), 2);

        let changed = graph.add_transitions(
            TestState::Processing,
            [TestState::Complete, TestState::Failed],
        );
        assert!(!changed);
    }

    #[test]
    fn add_all_transitions_skips_loops_unless_asked() {
        let states = [
            TestState::Initial,
            TestState::Processing,
            TestState::Complete,
        ];
        let mut graph = StateGraph::new();

        assert!(graph.add_all_transitions(&states, false));
        assert_eq!(graph.edge_count(), 6);
        for state in &states {
            assert!(!graph.can_transition(state, state));
        }

        assert!(graph.add_all_transitions(&states, true));
        assert_eq!(graph.edge_count(), 9);
        assert!(graph.can_transition(&TestState::Complete, &TestState::Complete));

        assert!(!graph.add_all_transitions(&states, true));
    }

    #[test]
    fn adding_no_targets_leaves_graph_empty() {
        let mut graph = StateGraph::new();

        assert!(!graph.add_transitions(TestState::Initial, Vec::new()));
        assert!(!graph.add_all_transitions(&[TestState::Processing], false));

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn remove_transitions_ignores_missing_edges() {
        let mut graph = StateGraph::new();
        graph.add_transitions(
            TestState::Processing,
            [TestState::Complete, TestState::Failed],
        );

        assert!(!graph.remove_transitions(&TestState::Initial, &[TestState::Processing]));
        assert!(graph.remove_transitions(
            &TestState::Processing,
            &[TestState::Complete, TestState::Initial],
        ));
        assert!(!graph.remove_transitions(&TestState::Processing, &[TestState::Complete]));

        assert!(graph.can_transition(&TestState::Processing, &TestState::Failed));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn removing_last_edge_empties_graph() {
        let mut graph = StateGraph::new();
        graph.add_transition(TestState::Initial, TestState::Processing);
        graph.remove_transitions(&TestState::Initial, &[TestState::Processing]);

        assert!(graph.is_empty());
        assert_eq!(graph.transitions_from(&TestState::Initial).count(), 0);
    }

    #[test]
    fn transitions_from_lists_targets() {
        let mut graph = StateGraph::new();
        graph.add_transitions(
            TestState::Processing,
            [TestState::Complete, TestState::Failed],
        );

        let mut targets: Vec<_> = graph.transitions_from(&TestState::Processing).collect();
        targets.sort_by_key(|s| format!("{s:?}"));

        assert_eq!(targets, vec![&TestState::Complete, &TestState::Failed]);
    }
}

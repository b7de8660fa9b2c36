//! Property-based tests for the state machine engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated graphs and walks.

use esm::{MachineError, StateGraph, StateMachine};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum TestState {
    Initial,
    Processing,
    Complete,
    Failed,
}

const ALL: [TestState; 4] = [
    TestState::Initial,
    TestState::Processing,
    TestState::Complete,
    TestState::Failed,
];

prop_compose! {
    fn arbitrary_state()(variant in 0..4u8) -> TestState {
        match variant {
            0 => TestState::Initial,
            1 => TestState::Processing,
            2 => TestState::Complete,
            _ => TestState::Failed,
        }
    }
}

fn distinct_states() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::hash_set(any::<u8>(), 0..12)
        .prop_map(|set| set.into_iter().collect::<Vec<u8>>())
}

fn complete_machine() -> StateMachine<TestState> {
    let mut machine = StateMachine::new();
    machine.set_initial_state(TestState::Initial);
    machine.add_all_transitions(&ALL, true);
    machine.reset();
    machine
}

proptest! {
    #[test]
    fn add_transition_is_new_once_then_idempotent(
        from in arbitrary_state(),
        to in arbitrary_state(),
    ) {
        let mut machine = StateMachine::new();

        prop_assert!(machine.add_transition(from, to));
        prop_assert!(machine.can_transition(&from, &to));
        prop_assert!(!machine.add_transition(from, to));
        prop_assert!(machine.can_transition(&from, &to));
    }

    #[test]
    fn all_transitions_without_loops_has_n_times_n_minus_one_edges(
        states in distinct_states()
    ) {
        let n = states.len();
        let mut graph = StateGraph::new();
        graph.add_all_transitions(&states, false);

        prop_assert_eq!(graph.edge_count(), n * n.saturating_sub(1));
        for state in &states {
            prop_assert!(!graph.can_transition(state, state));
        }
    }

    #[test]
    fn all_transitions_with_loops_has_n_squared_edges(states in distinct_states()) {
        let n = states.len();
        let mut graph = StateGraph::new();
        graph.add_all_transitions(&states, true);

        prop_assert_eq!(graph.edge_count(), n * n);
    }

    #[test]
    fn reset_returns_to_latest_initial_state(
        walk in prop::collection::vec(arbitrary_state(), 0..10),
        initial in arbitrary_state(),
    ) {
        let mut machine = complete_machine();
        for state in walk {
            machine.fire_transition(state).unwrap();
        }

        machine.set_initial_state(initial);
        machine.reset();

        prop_assert_eq!(machine.current_state(), Some(&initial));
        prop_assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn history_length_is_accepted_transitions_plus_one(
        edges in prop::collection::vec((arbitrary_state(), arbitrary_state()), 0..8),
        walk in prop::collection::vec(arbitrary_state(), 0..20),
    ) {
        let mut machine = StateMachine::new();
        machine.set_initial_state(TestState::Initial);
        for (from, to) in edges {
            machine.add_transition(from, to);
        }
        machine.reset();

        let mut accepted = 0;
        for state in walk {
            let before = *machine.current_state().unwrap();
            match machine.fire_transition(state) {
                Ok(_) => accepted += 1,
                Err(MachineError::InvalidTransition { .. }) => {
                    prop_assert_eq!(machine.current_state(), Some(&before));
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            prop_assert_eq!(machine.history().len(), accepted + 1);
        }
    }

    #[test]
    fn structural_mutation_while_ready_resets(
        walk in prop::collection::vec(arbitrary_state(), 1..10),
        remove_to in arbitrary_state(),
    ) {
        let mut machine = complete_machine();
        for state in walk {
            machine.fire_transition(state).unwrap();
        }

        let from = *machine.current_state().unwrap();
        prop_assert!(machine.remove_transitions(&from, &[remove_to]));

        prop_assert_eq!(machine.current_state(), Some(&TestState::Initial));
        prop_assert_eq!(machine.history().len(), 1);
        prop_assert!(!machine.is_modified());
    }

    #[test]
    fn sequence_matches_count_suffix_occurrences(
        walk in prop::collection::vec(arbitrary_state(), 0..20),
    ) {
        let pattern = vec![TestState::Processing, TestState::Complete];
        let hits = Arc::new(Mutex::new(0usize));
        let mut machine = complete_machine();

        let sink = Arc::clone(&hits);
        machine
            .on_sequence(pattern.clone(), move |matched| {
                assert_eq!(matched.to_vec(), vec![TestState::Processing, TestState::Complete]);
                *sink.lock().unwrap() += 1;
                Ok(())
            })
            .unwrap();

        for state in &walk {
            machine.fire_transition(*state).unwrap();
        }

        let path: Vec<TestState> = machine.history().path().into_iter().copied().collect();
        let expected = path.windows(2).filter(|w| *w == pattern.as_slice()).count();
        prop_assert_eq!(*hits.lock().unwrap(), expected);
    }

    #[test]
    fn snapshot_roundtrip_serialization(
        walk in prop::collection::vec(arbitrary_state(), 0..5)
    ) {
        let mut machine = complete_machine();
        for state in walk {
            machine.fire_transition(state).unwrap();
        }

        let snapshot = machine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: esm::MachineSnapshot<TestState> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored, snapshot);
    }
}

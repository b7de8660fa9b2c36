//! Core State trait for state machine states.
//!
//! A state is any value with total equality and a stable hash. States have
//! no identity beyond value equality: two equal values are the same state.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// Blanket-implemented for every type that satisfies the bounds, so callers
/// never implement it by hand. Enums, integers and strings all qualify.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history and callback context
/// - `Eq` + `Hash`: States key the transition graph and callback indices
/// - `Debug`: States are rendered in errors and log events
/// - `Send` + `Sync`: Machines can be moved behind a host-side lock
///
/// # Example
///
/// ```rust
/// use esm::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&TaskState::Pending);
/// assert_state(&"any string");
/// assert_state(&42u32);
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

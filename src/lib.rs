//! ESM: an embeddable, generic finite-state-automaton engine
//!
//! Callers define states as any hashable value, declare the directed
//! transitions allowed between them, attach lifecycle callbacks and register
//! multi-step sequence patterns that fire when traversed.
//!
//! # Core Concepts
//!
//! - **State**: Any `Clone + Eq + Hash + Debug` value, via the `State` trait
//! - **Graph**: The mutable set of explicitly added edges
//! - **Callbacks**: Exit, transition and entry handlers run in that order
//! - **Sequences**: Patterns matched against the history of visited states
//! - **Reset**: Adding or removing an edge resets a running machine
//!
//! The engine is synchronous and does no internal locking. To share a
//! machine between threads, wrap it in a `Mutex`.
//!
//! # Example
//!
//! ```rust
//! use esm::{StateMachine, state_enum};
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!         Locked,
//!     }
//! }
//!
//! let mut machine = StateMachine::with_initial(Door::Closed);
//! machine.add_transitions(Door::Closed, [Door::Open, Door::Locked]);
//! machine.add_transitions(Door::Open, [Door::Closed]);
//! machine.add_transitions(Door::Locked, [Door::Closed]);
//!
//! machine.on_exiting(Door::Locked, |ctx| {
//!     println!("unlocking towards {:?}", ctx.to);
//!     Ok(())
//! });
//! machine
//!     .on_sequence([Door::Open, Door::Closed, Door::Locked], |_| {
//!         println!("closed and locked behind us");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! machine.fire_transition(Door::Open).unwrap();
//! machine.fire_transition(Door::Closed).unwrap();
//! let report = machine.fire_transition(Door::Locked).unwrap();
//!
//! assert_eq!(report.sequences_matched, 1);
//! assert_eq!(machine.history().len(), 4);
//! ```

pub mod builder;
pub mod callbacks;
pub mod core;
pub mod machine;
pub mod sequence;

// Re-export commonly used types
pub use crate::core::{State, StateGraph, StateHistory};
pub use builder::{BuildError, StateMachineBuilder};
pub use callbacks::{
    CallbackFailure, CallbackResult, HandlerKind, HandlerRegistration, TransitionContext,
};
pub use machine::{MachineError, MachineSnapshot, StateMachine, TransitionReport};
pub use sequence::SequenceMatcher;

//! The state machine controller.
//!
//! [`StateMachine`] owns the transition graph, the callback registry and
//! the sequence matcher, and keeps them consistent with the running state:
//!
//! - A machine is *uninitialized* until the first [`reset`]
//! - [`fire_transition`] validates against the graph, dispatches callbacks,
//!   commits the new state and then evaluates sequence patterns
//! - Adding or removing an edge while initialized resets the machine
//!
//! [`reset`]: StateMachine::reset
//! [`fire_transition`]: StateMachine::fire_transition

mod error;
mod report;
mod state_machine;

pub use error::MachineError;
pub use report::{MachineSnapshot, TransitionReport};
pub use state_machine::StateMachine;

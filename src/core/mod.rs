//! Core state machine types.
//!
//! This module contains the data structures the machine is built from:
//! - State definitions via the `State` trait
//! - The directed transition graph
//! - History of visited states

mod graph;
mod history;
mod state;

pub use graph::StateGraph;
pub use history::{HistoryEntry, StateHistory};
pub use state::State;

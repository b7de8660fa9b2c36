//! Build errors for the state machine builder.

use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error(transparent)]
    Machine(#[from] MachineError),
}

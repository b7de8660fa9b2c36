//! Machine error types.

use thiserror::Error;

/// Errors surfaced synchronously by state machine operations.
///
/// States are rendered with `Debug` so the error type stays independent of
/// the machine's state type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("State machine is not initialized. Call .reset() after setting an initial state")]
    Uninitialized,

    #[error("No transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Sequence pattern must contain at least one state")]
    EmptySequence,
}

//! Callback failure reporting.

use super::registration::{HandlerKind, HandlerRegistration};
use thiserror::Error;
use uuid::Uuid;

/// Boxed error returned by user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by user callbacks and sequence handlers.
pub type CallbackResult = Result<(), BoxError>;

/// A user callback returned an error during dispatch.
///
/// Failures are isolated: the remaining callbacks still run and the
/// transition is still committed. The failure is returned to the caller
/// in the transition report and logged as a warning.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind} handler {id} failed during {during}: {message}")]
pub struct CallbackFailure {
    /// Registration identity of the failing handler
    pub id: Uuid,
    /// Which collection the handler was registered in
    pub kind: HandlerKind,
    /// What was being dispatched, e.g. `Idle -> Busy`
    pub during: String,
    /// Rendered error returned by the handler
    pub message: String,
}

impl CallbackFailure {
    pub(crate) fn new(registration: &HandlerRegistration, during: String, error: BoxError) -> Self {
        Self {
            id: registration.id(),
            kind: registration.kind(),
            during,
            message: error.to_string(),
        }
    }

    pub(crate) fn log(&self) {
        tracing::warn!(
            handler = %self.id,
            kind = %self.kind,
            during = %self.during,
            "Callback failed: {}",
            self.message
        );
    }
}

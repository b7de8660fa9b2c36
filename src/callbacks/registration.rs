//! Handler registrations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Which collection a handler was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandlerKind {
    /// Runs when a state is entered
    Entering,
    /// Runs when a state is exited
    Exiting,
    /// Runs on one specific edge
    Transition,
    /// Runs when a sequence of states has been traversed
    Sequence,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Entering => "entering",
            Self::Exiting => "exiting",
            Self::Transition => "transition",
            Self::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// Token referencing exactly one registered handler.
///
/// Dropping the token does not remove the handler; call [`remove`]. The
/// token shares a tombstone with the entry it refers to, so removal works
/// without access to the machine, including from inside a running callback.
///
/// [`remove`]: HandlerRegistration::remove
///
/// # Example
///
/// ```rust
/// use esm::StateMachine;
///
/// let mut machine = StateMachine::with_initial("idle");
/// machine.add_transition("idle", "busy");
///
/// let registration = machine.on_entering("busy", |_| Ok(()));
/// assert!(registration.remove());
/// assert!(!registration.remove());
/// assert!(registration.is_removed());
/// ```
#[derive(Clone, Debug)]
pub struct HandlerRegistration {
    id: Uuid,
    kind: HandlerKind,
    removed: Arc<AtomicBool>,
}

impl HandlerRegistration {
    pub(crate) fn new(kind: HandlerKind) -> Self {
        let registration = Self {
            id: Uuid::new_v4(),
            kind,
            removed: Arc::new(AtomicBool::new(false)),
        };
        tracing::trace!(handler = %registration.id, %kind, "Handler registered");
        registration
    }

    /// Unique identity of this registration.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    /// Remove the referenced handler.
    ///
    /// Returns `true` only on the call that actually removed it; later
    /// calls are no-ops.
    pub fn remove(&self) -> bool {
        let removed = !self.removed.swap(true, Ordering::AcqRel);
        if removed {
            tracing::trace!(handler = %self.id, kind = %self.kind, "Handler removed");
        }
        removed
    }

    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }
}

impl PartialEq for HandlerRegistration {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HandlerRegistration {}

/// A handler stored alongside the registration that controls it.
pub(crate) struct Registered<H> {
    pub(crate) registration: HandlerRegistration,
    pub(crate) handler: H,
}

impl<H> Registered<H> {
    pub(crate) fn new(kind: HandlerKind, handler: H) -> Self {
        Self {
            registration: HandlerRegistration::new(kind),
            handler,
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        !self.registration.is_removed()
    }
}

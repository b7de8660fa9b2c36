//! Lifecycle callbacks for state machine transitions.
//!
//! Three independent collections are kept: callbacks run on entering a
//! state, on exiting a state, and on taking one specific edge. Every
//! registration returns a [`HandlerRegistration`] token that can remove
//! exactly that entry.
//!
//! # Dispatch order
//!
//! For an accepted transition `from -> to`:
//! 1. exit callbacks of `from`
//! 2. transition callbacks of `from -> to`
//! 3. entry callbacks of `to`
//!
//! Within each phase callbacks run in registration order. Failures are
//! accumulated rather than short-circuiting.

mod context;
mod error;
mod registration;
mod registry;

pub use context::TransitionContext;
pub use error::{BoxError, CallbackFailure, CallbackResult};
pub use registration::{HandlerKind, HandlerRegistration};
pub use registry::{Callback, CallbackRegistry, Dispatch};

pub(crate) use registration::Registered;

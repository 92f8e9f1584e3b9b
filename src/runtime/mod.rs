//! The stateful runtime and its observer channels.
//!
//! A [`Runtime`] owns the current discrete state and the extended state,
//! feeds events to its [`Machine`](crate::core::Machine), dispatches the
//! resulting actions through its reducer and reports every externally
//! triggered operation with exactly one `change` notification.

mod channel;
mod error;
mod stateful;

pub use channel::{Channel, EventKind, ListenerId};
pub use error::RuntimeError;
pub use stateful::{Change, Runtime, WeakRuntime};

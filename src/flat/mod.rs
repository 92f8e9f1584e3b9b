//! A small flat statechart interpreter implementing [`Machine`](crate::core::Machine).
//!
//! States carry entry actions, exit actions and activities; transitions are
//! keyed by event name and may be guarded, targetless or self-targeted.
//! Hierarchy, parallel regions and history are out of scope.

mod machine;
mod state;

pub use machine::{FlatMachine, FlatTransition};
pub use state::{FlatState, StateNode};

//! Builder API for ergonomic runtime and machine construction.
//!
//! This module provides fluent builders and macros for wiring a machine,
//! its extended state and its reducers into a [`Runtime`](crate::runtime::Runtime)
//! with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod runtime;
pub mod transition;

pub use error::BuildError;
pub use machine::FlatMachineBuilder;
pub use runtime::RuntimeBuilder;
pub use transition::TransitionBuilder;

use crate::core::ExtendedState;
use crate::flat::FlatTransition;

/// Create an unguarded transition from `from` to `to` on `event`.
///
/// # Example
///
/// ```
/// use statewise::builder::simple_transition;
/// use statewise::core::JsonMap;
///
/// let transition = simple_transition::<JsonMap>("down", "SWITCH", "up");
/// assert_eq!(transition.target.as_deref(), Some("up"));
/// ```
pub fn simple_transition<E: ExtendedState>(
    from: impl Into<String>,
    event: impl Into<String>,
    to: impl Into<String>,
) -> FlatTransition<E> {
    FlatTransition {
        from: from.into(),
        event: event.into(),
        target: Some(to.into()),
        guard: None,
        actions: Vec::new(),
    }
}

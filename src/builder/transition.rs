//! Builder for constructing flat machine transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, Guard};
use crate::flat::FlatTransition;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<E> {
    from: Option<String>,
    event: Option<String>,
    target: Option<String>,
    guard: Option<Guard<E>>,
    actions: Vec<Action>,
}

impl<E> TransitionBuilder<E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            target: None,
            guard: None,
            actions: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the triggering event name (required).
    pub fn on(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the target state. Without one the transition is targetless.
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.target = Some(state.into());
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E, &Event) -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Append a transition action.
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<FlatTransition<E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;

        Ok(FlatTransition {
            from,
            event,
            target: self.target,
            guard: self.guard,
            actions: self.actions,
        })
    }
}

impl<E> Default for TransitionBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

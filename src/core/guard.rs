//! Guard predicates for conditional transitions.
//!
//! Guards are pure boolean functions over the extended state and the
//! triggering event. The bundled flat interpreter evaluates them; the
//! runtime itself never does.

use super::action::Event;
use std::fmt;

/// Pure predicate that determines if a transition can be taken.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use statewise::core::{json_patch, Event, Guard, JsonMap};
///
/// let guard = Guard::new(|ext: &JsonMap, event: &Event| {
///     ext.get("hello").is_some() && event.get("goodbye").is_some()
/// });
///
/// let ext = json_patch(json!({ "hello": true })).unwrap();
/// assert!(guard.check(&ext, &Event::new("BUMP").with("goodbye", true)));
/// assert!(!guard.check(&ext, &Event::new("BUMP")));
/// ```
pub struct Guard<E> {
    predicate: Box<dyn Fn(&E, &Event) -> bool>,
}

impl<E> Guard<E> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &Event) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, extstate: &E, event: &Event) -> bool {
        (self.predicate)(extstate, event)
    }
}

impl<E> fmt::Debug for Guard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_reads_extended_state() {
        let guard = Guard::new(|count: &u32, _event: &Event| *count > 2);

        assert!(guard.check(&3, &Event::new("GO")));
        assert!(!guard.check(&1, &Event::new("GO")));
    }

    #[test]
    fn guard_reads_event_payload() {
        let guard = Guard::new(|_: &(), event: &Event| event.get("force").is_some());

        assert!(guard.check(&(), &Event::new("GO").with("force", true)));
        assert!(!guard.check(&(), &Event::new("GO")));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|count: &u32, _event: &Event| count % 2 == 0);
        let event = Event::new("GO");

        assert_eq!(guard.check(&4, &event), guard.check(&4, &event));
    }
}

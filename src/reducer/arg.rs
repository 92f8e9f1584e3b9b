//! Snapshot handed to every reducer invocation.

use crate::core::{Action, Event, Machine};
use std::fmt;
use std::rc::Rc;

/// Values current at the moment one action is processed.
///
/// `state` and `extstate` may already include updates made by earlier
/// actions of the same batch. Effects receive the snapshot taken for their
/// own action, never a later one.
pub struct ReducerArg<M: Machine> {
    pub state: Rc<M::State>,
    pub extstate: Rc<M::Ext>,
    /// Triggering event; `None` for the entry actions run by `init`.
    pub event: Option<Rc<Event>>,
    pub action: Action,
}

impl<M: Machine> ReducerArg<M> {
    /// Name of the triggering event, if any.
    pub fn event_name(&self) -> Option<&str> {
        self.event.as_deref().map(|event| event.name.as_str())
    }
}

impl<M: Machine> Clone for ReducerArg<M> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            extstate: Rc::clone(&self.extstate),
            event: self.event.clone(),
            action: self.action.clone(),
        }
    }
}

impl<M: Machine> fmt::Debug for ReducerArg<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerArg")
            .field("state", &self.state)
            .field("extstate", &self.extstate)
            .field("event", &self.event)
            .field("action", &self.action)
            .finish()
    }
}

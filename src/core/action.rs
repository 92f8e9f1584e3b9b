//! Events fed to the interpreter and actions it hands back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Reserved action type for activity start markers.
pub const ACTIVITY_START: &str = "activity.start";

/// Reserved action type for activity stop markers.
pub const ACTIVITY_STOP: &str = "activity.stop";

/// An external event, optionally carrying payload fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name the interpreter matches transitions against.
    pub name: String,
    /// Extra fields, available to guards and reducers.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl Event {
    /// Create an event without payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Look up a payload field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What an action is: a plain named action or an activity lifecycle marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Entry, exit or transition action identified by its type.
    Named(String),
    /// The named activity starts because its state was entered.
    Start(String),
    /// The named activity stops because its state was exited.
    Stop(String),
}

/// One action produced by a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl Action {
    pub fn named(action_type: impl Into<String>) -> Self {
        Self::from_kind(ActionKind::Named(action_type.into()))
    }

    pub fn start(activity: impl Into<String>) -> Self {
        Self::from_kind(ActionKind::Start(activity.into()))
    }

    pub fn stop(activity: impl Into<String>) -> Self {
        Self::from_kind(ActionKind::Stop(activity.into()))
    }

    fn from_kind(kind: ActionKind) -> Self {
        Self {
            kind,
            payload: Map::new(),
        }
    }

    /// Add a payload field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// The action's type. Activity markers report the reserved
    /// [`ACTIVITY_START`] / [`ACTIVITY_STOP`] values.
    pub fn action_type(&self) -> &str {
        match &self.kind {
            ActionKind::Named(action_type) => action_type,
            ActionKind::Start(_) => ACTIVITY_START,
            ActionKind::Stop(_) => ACTIVITY_STOP,
        }
    }

    /// Activity name for lifecycle markers, `None` for named actions.
    pub fn activity(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Named(_) => None,
            ActionKind::Start(activity) | ActionKind::Stop(activity) => Some(activity),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl From<&str> for Action {
    fn from(action_type: &str) -> Self {
        Self::named(action_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_from_str_has_empty_payload() {
        let event = Event::from("SWITCH");
        assert_eq!(event.name, "SWITCH");
        assert!(event.payload.is_empty());
        assert_eq!(event.to_string(), "SWITCH");
    }

    #[test]
    fn event_payload_fields_are_readable() {
        let event = Event::new("BUMP").with("goodbye", true);
        assert_eq!(event.get("goodbye"), Some(&Value::Bool(true)));
        assert_eq!(event.get("hello"), None);
    }

    #[test]
    fn activity_markers_report_reserved_types() {
        let start = Action::start("blink");
        let stop = Action::stop("blink");

        assert_eq!(start.action_type(), ACTIVITY_START);
        assert_eq!(stop.action_type(), ACTIVITY_STOP);
        assert_eq!(start.activity(), Some("blink"));
        assert_eq!(stop.activity(), Some("blink"));
    }

    #[test]
    fn named_action_has_no_activity() {
        let action = Action::named("ping").with("foo", 3);
        assert_eq!(action.action_type(), "ping");
        assert_eq!(action.activity(), None);
        assert_eq!(action.get("foo"), Some(&Value::from(3)));
    }

    #[test]
    fn action_serializes_correctly() {
        let action = Action::stop("tick").with("n", 1);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}

//! State declarations and the snapshots the flat interpreter hands out.

use crate::core::{Action, MachineState};

/// Snapshot of a flat machine state plus the actions that led into it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatState {
    name: String,
    actions: Vec<Action>,
    terminal: bool,
}

impl FlatState {
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
            terminal: false,
        }
    }

    pub(crate) fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Same state, carrying a different action list.
    pub(crate) fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }
}

impl MachineState for FlatState {
    fn name(&self) -> &str {
        &self.name
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }

    fn is_final(&self) -> bool {
        self.terminal
    }
}

/// Declaration of one state: entry and exit actions plus the activities
/// that run while the machine is in it.
///
/// # Example
///
/// ```rust
/// use statewise::flat::StateNode;
///
/// let green = StateNode::new("green")
///     .entry("turn_on_green")
///     .exit("turn_off_green")
///     .activity("blink");
///
/// assert_eq!(green.name(), "green");
/// assert_eq!(green.activities(), ["blink".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateNode {
    name: String,
    entry: Vec<Action>,
    exit: Vec<Action>,
    activities: Vec<String>,
    terminal: bool,
}

impl StateNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: Vec::new(),
            exit: Vec::new(),
            activities: Vec::new(),
            terminal: false,
        }
    }

    /// Add an entry action.
    pub fn entry(mut self, action: impl Into<Action>) -> Self {
        self.entry.push(action.into());
        self
    }

    /// Add an exit action.
    pub fn exit(mut self, action: impl Into<Action>) -> Self {
        self.exit.push(action.into());
        self
    }

    /// Add an activity, started on entry and stopped on exit.
    pub fn activity(mut self, activity: impl Into<String>) -> Self {
        self.activities.push(activity.into());
        self
    }

    /// Mark the state as final.
    pub fn final_state(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Actions run when entering: entry actions, then activity starts.
    pub(crate) fn enter_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.entry
            .iter()
            .cloned()
            .chain(self.activities.iter().map(Action::start))
    }

    /// Actions run when leaving: activity stops, then exit actions.
    pub(crate) fn leave_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.activities
            .iter()
            .map(Action::stop)
            .chain(self.exit.iter().cloned())
    }

    pub(crate) fn snapshot(&self, actions: Vec<Action>) -> FlatState {
        FlatState::new(self.name.clone(), actions).terminal(self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(actions: impl Iterator<Item = Action>) -> Vec<String> {
        actions
            .map(|action| crate::reducer::dispatch_key(&action).into_owned())
            .collect()
    }

    #[test]
    fn enter_runs_entry_actions_before_activity_starts() {
        let node = StateNode::new("busy").activity("spin").entry("a").entry("b");
        assert_eq!(types(node.enter_actions()), vec!["a", "b", "spin:start"]);
    }

    #[test]
    fn leave_stops_activities_before_exit_actions() {
        let node = StateNode::new("busy").exit("x").activity("spin").activity("hum");
        assert_eq!(
            types(node.leave_actions()),
            vec!["spin:stop", "hum:stop", "x"]
        );
    }

    #[test]
    fn snapshot_keeps_name_and_finality() {
        let node = StateNode::new("done").final_state();
        let state = node.snapshot(vec![Action::named("cleanup")]);

        assert_eq!(state.name(), "done");
        assert!(state.is_final());
        assert_eq!(state.actions(), &[Action::named("cleanup")]);
    }

    #[test]
    fn plain_states_are_not_final() {
        assert!(!FlatState::new("idle", Vec::new()).is_final());
    }
}

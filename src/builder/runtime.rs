//! Builder for constructing runtimes.

use crate::builder::error::BuildError;
use crate::core::Machine;
use crate::reducer::{ActivityReducers, ReducerMap, ReducerSpec};
use crate::runtime::Runtime;

/// Builder for constructing [`Runtime`]s with a fluent API.
///
/// Without an explicit reducer every action resolves to no update. Reducer
/// maps and activity helpers added through [`reducers`](Self::reducers) and
/// [`activity`](Self::activity) are merged into one map, which is compiled
/// at build time; [`reducer`](Self::reducer) replaces all of that with a
/// single spec.
pub struct RuntimeBuilder<M: Machine> {
    machine: Option<M>,
    extstate: Option<M::Ext>,
    reducer: Option<ReducerSpec<M>>,
    map: ReducerMap<M>,
}

impl<M: Machine> RuntimeBuilder<M> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            machine: None,
            extstate: None,
            reducer: None,
            map: ReducerMap::new(),
        }
    }

    /// Set the machine (required).
    pub fn machine(mut self, machine: M) -> Self {
        self.machine = Some(machine);
        self
    }

    /// Set the initial extended state. Defaults to `M::Ext::default()`.
    pub fn extstate(mut self, extstate: M::Ext) -> Self {
        self.extstate = Some(extstate);
        self
    }

    /// Use `reducer` for every action.
    pub fn reducer(mut self, reducer: impl Into<ReducerSpec<M>>) -> Self {
        self.reducer = Some(reducer.into());
        self
    }

    /// Merge entries into the reducer map.
    pub fn reducers(mut self, map: ReducerMap<M>) -> Self {
        self.map = self.map.merge(map);
        self
    }

    /// Merge an activity helper's `:start` / `:stop` entries.
    pub fn activity(self, activity: ActivityReducers<M>) -> Self {
        self.reducers(activity.map)
    }

    /// Build the runtime.
    /// Returns an error if no machine was supplied.
    pub fn build(self) -> Result<Runtime<M>, BuildError> {
        let machine = self.machine.ok_or(BuildError::MissingMachine)?;
        let extstate = self.extstate.unwrap_or_default();
        let reducer = match self.reducer {
            Some(reducer) => reducer,
            None => self.map.compile(),
        };

        Ok(Runtime::from_parts(machine, extstate, reducer))
    }
}

impl<M: Machine> Default for RuntimeBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

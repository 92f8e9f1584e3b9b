//! Reducer maps: action keys compiled into a single dispatch reducer.

use super::arg::ReducerArg;
use super::result::ReducerResult;
use super::spec::ReducerSpec;
use crate::core::{Action, ActionKind, Machine};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Normalized dispatch key of an action.
///
/// Named actions map to their type, activity markers to
/// `"<activity>:start"` / `"<activity>:stop"`.
///
/// ```rust
/// use statewise::core::Action;
/// use statewise::reducer::dispatch_key;
///
/// assert_eq!(dispatch_key(&Action::named("inc")), "inc");
/// assert_eq!(dispatch_key(&Action::start("tick")), "tick:start");
/// assert_eq!(dispatch_key(&Action::stop("tick")), "tick:stop");
/// ```
pub fn dispatch_key(action: &Action) -> Cow<'_, str> {
    match &action.kind {
        ActionKind::Named(action_type) => Cow::Borrowed(action_type),
        ActionKind::Start(activity) => Cow::Owned(format!("{activity}:start")),
        ActionKind::Stop(activity) => Cow::Owned(format!("{activity}:stop")),
    }
}

/// Mapping from dispatch keys to reducer specs.
pub struct ReducerMap<M: Machine> {
    entries: HashMap<String, ReducerSpec<M>>,
}

impl<M: Machine> ReducerMap<M> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add an entry, replacing any previous spec for the same key.
    pub fn with(mut self, key: impl Into<String>, spec: impl Into<ReducerSpec<M>>) -> Self {
        self.insert(key, spec);
        self
    }

    /// Add a function-form entry.
    pub fn with_fn<F, R>(self, key: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&ReducerArg<M>) -> R + 'static,
        R: Into<ReducerResult<M>>,
    {
        self.with(key, ReducerSpec::from_fn(reducer))
    }

    pub fn insert(&mut self, key: impl Into<String>, spec: impl Into<ReducerSpec<M>>) {
        self.entries.insert(key.into(), spec.into());
    }

    /// Add every entry of `other`. Its entries win on key collisions.
    pub fn merge(mut self, other: ReducerMap<M>) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ReducerSpec<M>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile into one reducer dispatching on [`dispatch_key`].
    ///
    /// Keys without an entry resolve to [`ReducerResult::NoUpdate`].
    pub fn compile(self) -> ReducerSpec<M> {
        let entries = self.entries;
        ReducerSpec::from_fn(move |arg: &ReducerArg<M>| {
            let key = dispatch_key(&arg.action);
            match entries.get(key.as_ref()) {
                Some(spec) => spec.resolve(arg),
                None => {
                    tracing::trace!(key = %key, "no reducer registered for action");
                    ReducerResult::NoUpdate
                }
            }
        })
    }
}

impl<M: Machine> Default for ReducerMap<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Machine> Clone for ReducerMap<M> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<M: Machine> fmt::Debug for ReducerMap<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<M: Machine, K: Into<String>> FromIterator<(K, ReducerSpec<M>)> for ReducerMap<M> {
    fn from_iter<I: IntoIterator<Item = (K, ReducerSpec<M>)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<M: Machine, K: Into<String>> Extend<(K, ReducerSpec<M>)> for ReducerMap<M> {
    fn extend<I: IntoIterator<Item = (K, ReducerSpec<M>)>>(&mut self, iter: I) {
        for (key, spec) in iter {
            self.insert(key, spec);
        }
    }
}

impl<M: Machine> From<ReducerMap<M>> for ReducerSpec<M> {
    fn from(map: ReducerMap<M>) -> Self {
        map.compile()
    }
}

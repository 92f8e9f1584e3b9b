//! Extended state: application data kept alongside the discrete state.
//!
//! Updates are always shallow merges. `merge` never touches `self`; it
//! returns a fresh value, so every snapshot the runtime has published stays
//! exactly as it was observed.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// JSON object used as a dynamically keyed extended state.
pub type JsonMap = Map<String, Value>;

/// Trait for extended state values.
///
/// # Example
///
/// ```rust
/// use statewise::core::ExtendedState;
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Counter {
///     count: u32,
///     label: String,
/// }
///
/// #[derive(Clone, Debug, Default)]
/// struct CounterPatch {
///     count: Option<u32>,
///     label: Option<String>,
/// }
///
/// impl ExtendedState for Counter {
///     type Patch = CounterPatch;
///
///     fn merge(&self, patch: CounterPatch) -> Self {
///         Self {
///             count: patch.count.unwrap_or(self.count),
///             label: patch.label.unwrap_or_else(|| self.label.clone()),
///         }
///     }
/// }
///
/// let start = Counter { count: 1, label: "a".into() };
/// let next = start.merge(CounterPatch { count: Some(2), ..Default::default() });
/// assert_eq!(next, Counter { count: 2, label: "a".into() });
/// ```
pub trait ExtendedState: Clone + Debug + Default + 'static {
    /// Partial update holding only the changed keys.
    type Patch: Clone + Debug + 'static;

    /// Shallow-merge `patch` into a copy of `self`. Keys absent from the
    /// patch keep their current value.
    fn merge(&self, patch: Self::Patch) -> Self;
}

impl ExtendedState for JsonMap {
    type Patch = JsonMap;

    fn merge(&self, patch: JsonMap) -> Self {
        let mut next = self.clone();
        next.extend(patch);
        next
    }
}

impl<K, V, S> ExtendedState for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + Debug + 'static,
    V: Clone + Debug + 'static,
    S: BuildHasher + Clone + Default + 'static,
{
    type Patch = HashMap<K, V, S>;

    fn merge(&self, patch: Self::Patch) -> Self {
        let mut next = self.clone();
        next.extend(patch);
        next
    }
}

impl<K, V> ExtendedState for BTreeMap<K, V>
where
    K: Ord + Clone + Debug + 'static,
    V: Clone + Debug + 'static,
{
    type Patch = BTreeMap<K, V>;

    fn merge(&self, patch: Self::Patch) -> Self {
        let mut next = self.clone();
        next.extend(patch);
        next
    }
}

/// Turn a JSON value into a [`JsonMap`] patch.
///
/// Only objects are patches. `null` and every other value yield `None`,
/// which the runtime treats as "nothing to update".
///
/// ```rust
/// use serde_json::json;
/// use statewise::core::json_patch;
///
/// assert!(json_patch(json!({ "count": 2 })).is_some());
/// assert!(json_patch(json!(null)).is_none());
/// ```
pub fn json_patch(value: Value) -> Option<JsonMap> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

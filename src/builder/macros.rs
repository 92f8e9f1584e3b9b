//! Macros for ergonomic reducer map construction.

/// Build a [`ReducerMap`](crate::reducer::ReducerMap) from `key => spec` pairs.
///
/// Each spec may be anything convertible into a
/// [`ReducerSpec`](crate::reducer::ReducerSpec): a [`ReducerResult`](crate::reducer::ReducerResult),
/// a compiled spec or a nested map. Later entries replace earlier ones.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use statewise::core::{json_patch, JsonMap};
/// use statewise::flat::FlatMachine;
/// use statewise::reducer::{Reducer, ReducerMap};
/// use statewise::reducer_map;
///
/// type Json = FlatMachine<JsonMap>;
/// type R = Reducer<Json>;
///
/// let map: ReducerMap<Json> = reducer_map! {
///     "reset" => R::update(json_patch(json!({ "count": 0 })).unwrap()),
///     "noop" => R::no_update(),
/// };
///
/// assert!(map.contains_key("reset"));
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! reducer_map {
    ($($key:expr => $spec:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::reducer::ReducerMap::new();
        $(
            map.insert($key, $spec);
        )*
        map
    }};
}

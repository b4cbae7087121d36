//! Small list and optional-value helpers.
//!
//! `Option` already provides `map`, `and_then` and `unwrap_or`; `of` adds
//! the missing "nullable JSON to option" conversion.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// True if any element satisfies `equals`
pub fn contains<T>(list: &[T], equals: impl Fn(&T) -> bool) -> bool {
    list.iter().any(equals)
}

/// Read an optional JSON value: absent, `null` and values of the wrong
/// shape all become `None`
pub fn of<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => serde_json::from_value(v.clone()).ok(),
    }
}

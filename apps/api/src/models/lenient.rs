//! Forgiving deserializers for editor-supplied resume JSON.
//!
//! Resume records are drafts: any field can be missing, `null`, or the wrong
//! shape while the user is typing. None of these helpers ever return an error;
//! a value of the wrong shape degrades to "absent".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

/// A record whose wire form also accepts older key names.
///
/// Aliases are folded into the canonical key before deserializing, so a record
/// carrying both spellings keeps its canonical value instead of failing.
pub trait WireAliases {
    /// `(canonical, alias)` pairs, both in wire spelling.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];
}

/// Folds alias keys into their canonical key. A present, non-null canonical
/// value wins; otherwise the alias value takes its place.
pub fn fold_aliases(map: &mut Map<String, Value>, aliases: &[(&str, &str)]) {
    for (canonical, alias) in aliases {
        let Some(alt) = map.remove(*alias) else {
            continue;
        };
        if map.get(*canonical).map_or(true, Value::is_null) {
            map.insert((*canonical).to_string(), alt);
        }
    }
}

/// One record from a JSON value. Only non-objects yield `None`.
fn record<T>(value: Value) -> Option<T>
where
    T: DeserializeOwned + WireAliases,
{
    let Value::Object(mut map) = value else {
        return None;
    };
    fold_aliases(&mut map, T::ALIASES);
    serde_json::from_value(Value::Object(map))
        .map_err(|err| debug!("Skipping unreadable record: {err}"))
        .ok()
}

/// Strings pass through, numbers are stringified (`3.8` → `"3.8"`), anything else is absent.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Accepts an array of text values or a newline-separated string.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(value_to_text).collect(),
        Value::String(s) => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    })
}

/// Only an explicit boolean `false` hides an item.
pub fn visible<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(!matches!(value, Value::Bool(false)))
}

/// Only an explicit boolean `true` sets the flag.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// A sequence of records. Non-arrays become empty; non-object elements are skipped.
pub fn collection<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + WireAliases,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items.into_iter().filter_map(record).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            debug!("Expected a list, got {}; treating as empty", kind_of(&other));
            Ok(Vec::new())
        }
    }
}

/// A nested record. Non-objects fall back to the default value.
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + WireAliases + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(record(value).unwrap_or_default())
}

pub fn default_visible() -> bool {
    true
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

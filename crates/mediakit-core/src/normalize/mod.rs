//! Hierarchical configuration normalization.
//!
//! Turns a flat option set keyed by `snake_case` or `dot.separated` names
//! into a nested, type-coerced document:
//!
//! 1. coerce scalars (`"on"`/`"off"`, integer literals, `"none"` removes the key)
//! 2. rename keys to `lowerCamelCase`
//! 3. expand dotted keys into nested documents, deep-merging as they arrive
//! 4. prune empty strings and empty documents
//!
//! Normalizing the flattened output again yields the same document.

mod coerce;
mod merge;

pub use coerce::{coerce, to_lower_camel, REMOVE_MARKER};
pub use merge::{deep_merge, expand_key, prune_empty};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value in the flat input option set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&str> for FlatValue {
    fn from(s: &str) -> Self {
        FlatValue::Str(s.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(s: String) -> Self {
        FlatValue::Str(s)
    }
}

impl From<bool> for FlatValue {
    fn from(b: bool) -> Self {
        FlatValue::Bool(b)
    }
}

impl From<i64> for FlatValue {
    fn from(n: i64) -> Self {
        FlatValue::Int(n)
    }
}

impl From<f64> for FlatValue {
    fn from(n: f64) -> Self {
        FlatValue::Float(n)
    }
}

/// A resolved value in a [`ConfigDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Doc(ConfigDocument),
}

impl From<ConfigValue> for serde_json::Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Bool(b) => serde_json::Value::Bool(b),
            ConfigValue::Int(n) => serde_json::Value::from(n),
            // Non-finite floats have no JSON form and become null.
            ConfigValue::Float(n) => serde_json::Value::from(n),
            ConfigValue::Str(s) => serde_json::Value::String(s),
            ConfigValue::Doc(doc) => serde_json::Value::Object(doc.into()),
        }
    }
}

/// Nested string-keyed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(BTreeMap<String, ConfigValue>);

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding exactly one key.
    pub fn single(key: impl Into<String>, value: ConfigValue) -> Self {
        let mut doc = Self::new();
        doc.insert(key, value);
        doc
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Looks up a dotted path such as `thumbnailProps.width`.
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            match current {
                ConfigValue::Doc(doc) => current = doc.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    /// Flattens back to dot-joined keys with native scalar values, the
    /// inverse of expansion.
    pub fn flatten(&self) -> Vec<(String, FlatValue)> {
        let mut out = Vec::new();
        flatten_into(self, None, &mut out);
        out
    }
}

fn flatten_into(doc: &ConfigDocument, prefix: Option<&str>, out: &mut Vec<(String, FlatValue)>) {
    for (key, value) in doc.iter() {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            ConfigValue::Bool(b) => out.push((path, FlatValue::Bool(*b))),
            ConfigValue::Int(n) => out.push((path, FlatValue::Int(*n))),
            ConfigValue::Float(n) => out.push((path, FlatValue::Float(*n))),
            ConfigValue::Str(s) => out.push((path, FlatValue::Str(s.clone()))),
            ConfigValue::Doc(inner) => flatten_into(inner, Some(&path), out),
        }
    }
}

impl IntoIterator for ConfigDocument {
    type Item = (String, ConfigValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ConfigValue)> for ConfigDocument {
    fn from_iter<I: IntoIterator<Item = (K, ConfigValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<ConfigDocument> for serde_json::Map<String, serde_json::Value> {
    fn from(doc: ConfigDocument) -> Self {
        doc.into_iter().map(|(k, v)| (k, v.into())).collect()
    }
}

/// Normalizes a flat option set into a nested document.
///
/// Keys are processed in iteration order; when two keys resolve to the same
/// leaf, the later one wins.
pub fn normalize<I, K>(flat: I) -> ConfigDocument
where
    I: IntoIterator<Item = (K, FlatValue)>,
    K: AsRef<str>,
{
    let mut doc = ConfigDocument::new();
    for (key, value) in flat {
        let key: &str = key.as_ref();
        let Some(value) = coerce(value) else {
            tracing::debug!(key, "dropping option marked none");
            continue;
        };
        let Some(nested) = expand_key(&to_lower_camel(key), value) else {
            tracing::debug!(key, "dropping option with empty key");
            continue;
        };
        doc = deep_merge(doc, nested);
    }
    prune_empty(doc)
}

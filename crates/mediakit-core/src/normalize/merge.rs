//! Dot expansion, deep merge, and empty pruning over owned documents.
//!
//! All functions consume their inputs and return new documents; nothing is
//! mutated through a shared reference.

use super::{ConfigDocument, ConfigValue};

/// Builds the right-nested document for a dotted key, innermost level
/// holding `value`. Empty components are skipped; returns `None` when no
/// component remains.
pub fn expand_key(key: &str, value: ConfigValue) -> Option<ConfigDocument> {
    let components: Vec<&str> = key.split('.').filter(|c| !c.is_empty()).collect();
    let (outer, inner) = components.split_first()?;
    let nested = inner.iter().rev().fold(value, |acc, component| {
        ConfigValue::Doc(ConfigDocument::single(*component, acc))
    });
    Some(ConfigDocument::single(*outer, nested))
}

/// Merges `overlay` into `base`. Documents under the same key merge
/// recursively; any other collision resolves to the overlay value.
pub fn deep_merge(base: ConfigDocument, overlay: ConfigDocument) -> ConfigDocument {
    let mut merged = base;
    for (key, value) in overlay {
        let resolved = match (merged.remove(&key), value) {
            (Some(ConfigValue::Doc(existing)), ConfigValue::Doc(incoming)) => {
                ConfigValue::Doc(deep_merge(existing, incoming))
            }
            (_, incoming) => incoming,
        };
        merged.insert(key, resolved);
    }
    merged
}

/// Recursively drops empty strings and empty documents. Booleans and
/// integers are never empty.
pub fn prune_empty(doc: ConfigDocument) -> ConfigDocument {
    doc.into_iter()
        .filter_map(|(key, value)| match value {
            ConfigValue::Str(s) if s.is_empty() => None,
            ConfigValue::Doc(inner) => {
                let inner = prune_empty(inner);
                (!inner.is_empty()).then(|| (key, ConfigValue::Doc(inner)))
            }
            other => Some((key, other)),
        })
        .collect()
}

//! Transformation recognition for legacy delivery paths.
//!
//! A transformation segment is a comma-separated list of `<param>_<value>`
//! directives, e.g. `w_200,h_200,c_fill`. Recognition is an injected seam
//! ([`TransformRecognizer`]) so hosts can plug in their own decoder; the
//! built-in [`SyntaxRecognizer`] covers the common parameter set.

use serde::{Deserialize, Serialize};

/// A single directive value: numeric values decode to integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformValue {
    Int(i64),
    Text(String),
}

impl TransformValue {
    fn decode(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(TransformValue::Int)
            .unwrap_or_else(|_| TransformValue::Text(raw.to_string()))
    }
}

/// One transformation descriptor: directive name to value, in the order the
/// directives appeared. Serializes as a JSON object with that key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformation(Vec<(String, TransformValue)>);

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `param`, replacing an existing value in place.
    pub fn insert(&mut self, param: impl Into<String>, value: TransformValue) {
        let param = param.into();
        match self.0.iter_mut().find(|(name, _)| *name == param) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((param, value)),
        }
    }

    pub fn get(&self, param: &str) -> Option<&TransformValue> {
        self.0
            .iter()
            .find(|(name, _)| name == param)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TransformValue)> {
        self.0.iter().map(|(name, value)| (name, value))
    }
}

impl<K: Into<String>> FromIterator<(K, TransformValue)> for Transformation {
    fn from_iter<I: IntoIterator<Item = (K, TransformValue)>>(iter: I) -> Self {
        let mut transformation = Self::new();
        for (param, value) in iter {
            transformation.insert(param, value);
        }
        transformation
    }
}

impl Serialize for Transformation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (param, value) in &self.0 {
            map.serialize_entry(param, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Transformation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TransformationVisitor;

        impl<'de> serde::de::Visitor<'de> for TransformationVisitor {
            type Value = Transformation;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of transformation directives")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut transformation = Transformation::new();
                while let Some((param, value)) = access.next_entry::<String, TransformValue>()? {
                    transformation.insert(param, value);
                }
                Ok(transformation)
            }
        }

        deserializer.deserialize_map(TransformationVisitor)
    }
}

/// Decodes a path segment into transformations, or returns an empty set when
/// the segment is not transformation syntax.
pub trait TransformRecognizer {
    fn recognize(&self, segment: &str) -> Vec<Transformation>;
}

impl<F> TransformRecognizer for F
where
    F: Fn(&str) -> Vec<Transformation>,
{
    fn recognize(&self, segment: &str) -> Vec<Transformation> {
        self(segment)
    }
}

/// Directive names accepted by [`SyntaxRecognizer`].
const KNOWN_PARAMS: &[&str] = &[
    "a", "ac", "af", "ar", "b", "bo", "br", "c", "co", "cs", "d", "dl", "dn", "dpr", "du", "e",
    "eo", "f", "fl", "fn", "fps", "g", "h", "if", "ki", "l", "o", "p", "pg", "q", "r", "so", "sp",
    "t", "u", "vc", "vs", "w", "x", "y", "z",
];

/// Recognizer for the standard `<param>_<value>[,<param>_<value>...]` syntax.
///
/// Every comma-separated part must name a known directive and carry a
/// non-empty value, otherwise the whole segment is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxRecognizer;

impl TransformRecognizer for SyntaxRecognizer {
    fn recognize(&self, segment: &str) -> Vec<Transformation> {
        let mut transformation = Transformation::new();
        for part in segment.split(',') {
            let Some((param, value)) = part.split_once('_') else {
                return Vec::new();
            };
            if value.is_empty() || !KNOWN_PARAMS.contains(&param) {
                return Vec::new();
            }
            transformation.insert(param, TransformValue::decode(value));
        }
        vec![transformation]
    }
}

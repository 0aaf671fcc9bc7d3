//! Scalar coercion and key casing for flat option sets.

use super::{ConfigValue, FlatValue};

/// Literal that marks a key for removal.
pub const REMOVE_MARKER: &str = "none";

/// Coerces a flat value: `"on"`/`"off"` become booleans, integer literals
/// become integers, everything else stays as-is.
///
/// Returns `None` for the remove marker.
pub fn coerce(value: FlatValue) -> Option<ConfigValue> {
    match value {
        FlatValue::Bool(b) => Some(ConfigValue::Bool(b)),
        FlatValue::Int(n) => Some(ConfigValue::Int(n)),
        FlatValue::Float(n) => Some(ConfigValue::Float(n)),
        FlatValue::Str(s) => match s.as_str() {
            REMOVE_MARKER => None,
            "on" => Some(ConfigValue::Bool(true)),
            "off" => Some(ConfigValue::Bool(false)),
            _ => Some(parse_integer(&s).map(ConfigValue::Int).unwrap_or(ConfigValue::Str(s))),
        },
    }
}

/// Parses an optional `-` followed by ASCII digits; anything else, or a value
/// outside `i64`, is not an integer literal.
fn parse_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Converts `snake_case` keys to `lowerCamelCase`.
///
/// Each `_` is dropped and the character after it uppercased; the first
/// character of the result is lowercased. Dots pass through untouched.
pub fn to_lower_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

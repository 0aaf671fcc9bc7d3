//! Gallery configuration assembly.
//!
//! Combines the normalized plugin options with the resolved cloud name, a
//! few computed fields, and an optional user-supplied JSON overlay into the
//! document handed to the front-end gallery widget.

mod session;

pub use session::{CloudNameLookup, GallerySession};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MediaError;
use crate::normalize::{normalize, to_lower_camel, FlatValue};

/// Selector the widget mounts into unless configured otherwise.
pub const DEFAULT_CONTAINER: &str = ".media-gallery";

/// Directive keys (in camel form) that are never rendered as options.
const CONTROL_KEYS: &[&str] = &["enableGallery", "customSettings"];

/// Camel form of the key carrying the raw custom JSON overlay.
pub(crate) const CUSTOM_SETTINGS_KEY: &str = "customSettings";

/// Final gallery configuration: a JSON object with camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryConfig(Map<String, Value>);

impl GalleryConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Compact JSON for a data endpoint.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// JSON literal that is safe to place inside an inline `<script>` block.
    pub fn to_embed_literal(&self) -> String {
        self.to_json_string()
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026")
            .replace('\'', "\\u0027")
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029")
    }
}

/// True for keys that are directives rather than rendered options, in
/// either their original or camel-cased spelling.
pub fn is_control_key(key: &str) -> bool {
    CONTROL_KEYS.contains(&to_lower_camel(key).as_str())
}

/// Assembles a gallery configuration mounted into [`DEFAULT_CONTAINER`].
///
/// See [`assemble_in`].
pub fn assemble<I, K>(
    base: I,
    cloud_identifier: &str,
    custom_json: Option<&str>,
) -> Result<GalleryConfig, MediaError>
where
    I: IntoIterator<Item = (K, FlatValue)>,
    K: AsRef<str>,
{
    assemble_in(base, cloud_identifier, custom_json, DEFAULT_CONTAINER)
}

/// Assembles a gallery configuration.
///
/// Control keys are stripped, the rest is normalized, and `cloudName`,
/// `mediaAssets` (empty), and `container` are injected. A non-blank
/// `custom_json` must be a JSON object; its top-level keys replace the
/// computed ones wholesale. On any error no document is returned.
pub fn assemble_in<I, K>(
    base: I,
    cloud_identifier: &str,
    custom_json: Option<&str>,
    container: &str,
) -> Result<GalleryConfig, MediaError>
where
    I: IntoIterator<Item = (K, FlatValue)>,
    K: AsRef<str>,
{
    if cloud_identifier.is_empty() {
        return Err(MediaError::LookupFailure(
            "cloud name resolved to an empty string".to_string(),
        ));
    }

    let overlay = custom_json
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_overlay)
        .transpose()?;

    let options = base
        .into_iter()
        .filter(|(key, _)| !is_control_key(key.as_ref()));
    let mut map: Map<String, Value> = normalize(options).into();

    map.insert("cloudName".to_string(), Value::from(cloud_identifier));
    map.insert("mediaAssets".to_string(), Value::Array(Vec::new()));
    map.insert("container".to_string(), Value::from(container));

    if let Some(overlay) = overlay {
        tracing::debug!(keys = overlay.len(), "applying custom gallery settings");
        map.extend(overlay);
    }

    tracing::info!(options = map.len(), "assembled gallery config");
    Ok(GalleryConfig(map))
}

fn parse_overlay(raw: &str) -> Result<Map<String, Value>, MediaError> {
    match serde_json::from_str::<Value>(raw).map_err(MediaError::InvalidCustomConfigJson)? {
        Value::Object(map) => Ok(map),
        other => Err(invalid_overlay(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn invalid_overlay(msg: String) -> MediaError {
    MediaError::InvalidCustomConfigJson(<serde_json::Error as serde::de::Error>::custom(msg))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

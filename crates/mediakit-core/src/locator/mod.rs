//! Legacy asset locator parsing.
//!
//! Reconstructs a structured media identifier from a historical delivery path
//! of the shape
//! `/<cloud>/[image|video]/upload/[<transformation>/]v<digits>/<public-id>.<ext>`
//! where every bracketed part is optional and may appear in any order.

mod classify;
mod path;

pub use classify::{parse_version, LocatorSlots, SegmentClass, RESERVED_SEGMENTS};
pub use path::{legacy_path_from_url, split_segments, strip_extension};

use serde::{Deserialize, Serialize};

use crate::error::MediaError;
use crate::transform::{TransformRecognizer, Transformation};

/// Version assumed when a legacy path carries no `v<digits>` segment.
pub const DEFAULT_VERSION: u64 = 1;

/// Structured identifier recovered from a legacy path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAssetLocator {
    /// SHA-256 hex of the first path segment; `None` only when the path had
    /// no segments at all.
    pub cloud_token: Option<String>,
    pub version: u64,
    pub transformations: Vec<Transformation>,
    /// Empty when nothing was left for the public identifier.
    pub public_id: String,
}

impl LegacyAssetLocator {
    /// Locator for an asset known only by its stored public identifier.
    pub fn from_public_id(public_id: impl Into<String>) -> Self {
        Self {
            cloud_token: None,
            version: DEFAULT_VERSION,
            transformations: Vec::new(),
            public_id: public_id.into(),
        }
    }

    /// True when the parse produced nothing usable as a public identifier.
    pub fn is_malformed(&self) -> bool {
        self.public_id.is_empty()
    }
}

/// Parses a legacy delivery path.
///
/// Never fails: an empty `public_id` in the result signals that the path did
/// not identify an asset.
///
/// # Examples
///
/// - `/abc123/image/upload/w_200,h_200/v1617000000/folder/photo.jpg` yields
///   version `1617000000`, one `{w: 200, h: 200}` transformation, and public
///   id `folder/photo`.
pub fn parse_legacy_path<R>(raw_path: &str, recognizer: &R) -> LegacyAssetLocator
where
    R: TransformRecognizer + ?Sized,
{
    let mut slots = LocatorSlots::default();
    for segment in split_segments(raw_path) {
        let class = slots.classify(&segment, recognizer);
        tracing::trace!(segment = %segment, ?class, "classified legacy segment");
        slots.apply(segment, class);
    }

    let mut parts = slots.parts;
    if let Some(last) = parts.last_mut() {
        let stem_len = strip_extension(last).len();
        last.truncate(stem_len);
    }
    // A final segment that was nothing but an extension names no asset.
    let public_id = match parts.last() {
        Some(last) if last.is_empty() => String::new(),
        _ => parts.join("/"),
    };

    LegacyAssetLocator {
        cloud_token: slots.cloud_token,
        version: slots.version.unwrap_or(DEFAULT_VERSION),
        transformations: slots.transformations.unwrap_or_default(),
        public_id,
    }
}

/// Resolves a locator for `url`, falling back to `stored_public_id` when the
/// URL is not an absolute delivery URL or its path yields no public id.
///
/// Returns [`MediaError::MalformedLocatorPath`] when neither source works.
pub fn resolve_locator<R>(
    url: &str,
    stored_public_id: Option<&str>,
    recognizer: &R,
) -> Result<LegacyAssetLocator, MediaError>
where
    R: TransformRecognizer + ?Sized,
{
    if let Some(raw_path) = legacy_path_from_url(url) {
        let locator = parse_legacy_path(&raw_path, recognizer);
        if !locator.is_malformed() {
            return Ok(locator);
        }
        tracing::debug!(url, "legacy path yielded no public id");
    }

    match stored_public_id.filter(|id| !id.is_empty()) {
        Some(id) => Ok(LegacyAssetLocator::from_public_id(id)),
        None => Err(MediaError::MalformedLocatorPath {
            input: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::sha256_hex;
    use crate::transform::{SyntaxRecognizer, TransformValue};

    #[test]
    fn full_legacy_path() {
        let loc = parse_legacy_path(
            "/abc123/image/upload/w_200,h_200/v1617000000/folder/photo.jpg",
            &SyntaxRecognizer,
        );
        assert_eq!(loc.cloud_token, Some(sha256_hex(b"abc123")));
        assert_eq!(loc.version, 1_617_000_000);
        assert_eq!(loc.transformations.len(), 1);
        assert_eq!(
            loc.transformations[0].get("w"),
            Some(&TransformValue::Int(200))
        );
        assert_eq!(
            loc.transformations[0].get("h"),
            Some(&TransformValue::Int(200))
        );
        assert_eq!(loc.public_id, "folder/photo");
    }

    #[test]
    fn defaults_without_version_or_transformation() {
        let loc = parse_legacy_path("/abc123/image/upload/folder/photo.jpg", &SyntaxRecognizer);
        assert_eq!(loc.version, DEFAULT_VERSION);
        assert!(loc.transformations.is_empty());
        assert_eq!(loc.public_id, "folder/photo");
    }

    #[test]
    fn optional_parts_in_any_order() {
        let loc = parse_legacy_path("abc123/v7/upload/w_50/video/clip.mp4", &SyntaxRecognizer);
        assert_eq!(loc.version, 7);
        assert_eq!(loc.transformations.len(), 1);
        assert_eq!(loc.public_id, "clip");
    }

    #[test]
    fn only_last_segment_loses_extension() {
        let loc = parse_legacy_path("/abc/upload/v1.2/my.folder/photo.final.png", &SyntaxRecognizer);
        assert_eq!(loc.version, DEFAULT_VERSION);
        assert_eq!(loc.public_id, "v1.2/my.folder/photo.final");
    }

    #[test]
    fn second_transformation_folds_into_public_id() {
        let loc = parse_legacy_path("/abc/upload/w_200/c_fill/photo.jpg", &SyntaxRecognizer);
        assert_eq!(loc.transformations.len(), 1);
        assert_eq!(loc.public_id, "c_fill/photo");
    }

    #[test]
    fn nothing_left_is_malformed() {
        let loc = parse_legacy_path("/abc123/image/upload/v3", &SyntaxRecognizer);
        assert_eq!(loc.version, 3);
        assert_eq!(loc.public_id, "");
        assert!(loc.is_malformed());

        let empty = parse_legacy_path("", &SyntaxRecognizer);
        assert_eq!(empty.cloud_token, None);
        assert!(empty.is_malformed());
    }

    #[test]
    fn extension_only_last_segment_is_malformed() {
        let loc = parse_legacy_path("/abc/image/upload/folder/.jpg", &SyntaxRecognizer);
        assert_eq!(loc.public_id, "");
        assert!(loc.is_malformed());

        let err = resolve_locator(
            "https://res.example.com/abc/image/upload/folder/.jpg",
            None,
            &SyntaxRecognizer,
        )
        .unwrap_err();
        assert!(matches!(err, MediaError::MalformedLocatorPath { .. }));
    }

    #[test]
    fn resolve_parses_absolute_url() {
        let loc = resolve_locator(
            "https://res.example.com/abc123/image/upload/v9/folder/photo.jpg",
            Some("ignored"),
            &SyntaxRecognizer,
        )
        .unwrap();
        assert_eq!(loc.version, 9);
        assert_eq!(loc.public_id, "folder/photo");
    }

    #[test]
    fn resolve_falls_back_to_stored_id() {
        let loc = resolve_locator("not a url", Some("folder/photo"), &SyntaxRecognizer).unwrap();
        assert_eq!(loc, LegacyAssetLocator::from_public_id("folder/photo"));

        let loc = resolve_locator(
            "https://res.example.com/abc123/image/upload",
            Some("kept"),
            &SyntaxRecognizer,
        )
        .unwrap();
        assert_eq!(loc.public_id, "kept");
    }

    #[test]
    fn resolve_without_fallback_is_error() {
        let err = resolve_locator("https://res.example.com/", None, &SyntaxRecognizer).unwrap_err();
        assert!(matches!(err, MediaError::MalformedLocatorPath { .. }));
        let err = resolve_locator("nope", Some(""), &SyntaxRecognizer).unwrap_err();
        assert!(matches!(err, MediaError::MalformedLocatorPath { .. }));
    }
}

//! Per-segment classification for the legacy locator parser.
//!
//! Each segment is classified exactly once against the slots already filled,
//! in fixed precedence: cloud token, reserved token, transformations,
//! version, public-id part.

use crate::transform::{TransformRecognizer, Transformation};

/// Resource and delivery type tokens dropped from legacy paths.
pub const RESERVED_SEGMENTS: &[&str] = &["image", "video", "upload"];

/// What a single path segment turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentClass {
    CloudToken,
    Reserved,
    Transformations(Vec<Transformation>),
    Version(u64),
    PublicIdPart,
}

/// Slots filled so far during a parse.
#[derive(Debug, Default)]
pub struct LocatorSlots {
    pub cloud_token: Option<String>,
    pub version: Option<u64>,
    pub transformations: Option<Vec<Transformation>>,
    pub parts: Vec<String>,
}

impl LocatorSlots {
    /// Classify `segment` against the current slots without mutating them.
    pub fn classify<R>(&self, segment: &str, recognizer: &R) -> SegmentClass
    where
        R: TransformRecognizer + ?Sized,
    {
        if self.cloud_token.is_none() {
            return SegmentClass::CloudToken;
        }
        if RESERVED_SEGMENTS.contains(&segment) {
            return SegmentClass::Reserved;
        }
        if self.transformations.is_none() {
            let set = recognizer.recognize(segment);
            if !set.is_empty() {
                return SegmentClass::Transformations(set);
            }
        }
        if self.version.is_none() {
            if let Some(version) = parse_version(segment) {
                return SegmentClass::Version(version);
            }
        }
        SegmentClass::PublicIdPart
    }

    /// Record a classified segment into its slot.
    pub fn apply(&mut self, segment: String, class: SegmentClass) {
        match class {
            SegmentClass::CloudToken => {
                self.cloud_token = Some(crate::digest::sha256_hex(segment.as_bytes()));
            }
            SegmentClass::Reserved => {}
            SegmentClass::Transformations(set) => self.transformations = Some(set),
            SegmentClass::Version(v) => self.version = Some(v),
            SegmentClass::PublicIdPart => self.parts.push(segment),
        }
    }
}

/// Parses a `v<digits>` segment. The leading `v` is case-sensitive and the
/// version must be positive.
pub fn parse_version(segment: &str) -> Option<u64> {
    let digits = segment.strip_prefix('v')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|v| *v > 0)
}

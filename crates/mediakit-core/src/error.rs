//! Error kinds reported by the locator, normalizer, and gallery assembler.
//!
//! The core never decides recovery: every kind is returned to the caller,
//! which may log and fall back (e.g. to a default gallery document).

/// Errors surfaced by the core.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The legacy path yielded no public identifier and no stored one was available.
    #[error("malformed legacy locator path: {input:?}")]
    MalformedLocatorPath { input: String },

    /// The custom gallery settings were not a JSON object.
    #[error("invalid custom gallery config JSON: {0}")]
    InvalidCustomConfigJson(#[source] serde_json::Error),

    /// Resolving the cloud identifier failed.
    #[error("cloud name lookup failed: {0}")]
    LookupFailure(String),
}

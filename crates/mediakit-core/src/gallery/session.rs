//! Per-request gallery configuration with write-once memoization.

use std::sync::OnceLock;

use crate::error::MediaError;
use crate::normalize::{to_lower_camel, FlatValue};

use super::{
    assemble_in, invalid_overlay, GalleryConfig, CUSTOM_SETTINGS_KEY, DEFAULT_CONTAINER,
};

/// Resolves the cloud name for the current account.
pub trait CloudNameLookup {
    fn cloud_name(&self) -> anyhow::Result<String>;
}

impl<F> CloudNameLookup for F
where
    F: Fn() -> anyhow::Result<String>,
{
    fn cloud_name(&self) -> anyhow::Result<String> {
        self()
    }
}

/// Gallery configuration owned by one request or session.
///
/// The first successful [`config`](Self::config) call assembles and caches
/// the document; later calls return the same instance without touching the
/// lookup. Failures are not cached.
pub struct GallerySession<L> {
    settings: Vec<(String, FlatValue)>,
    lookup: L,
    container: String,
    cached: OnceLock<GalleryConfig>,
}

impl<L: CloudNameLookup> GallerySession<L> {
    /// Create a session over the flat plugin settings. The raw custom JSON
    /// overlay is read from the `custom_settings` entry, if any.
    pub fn new<I, K>(settings: I, lookup: L) -> Self
    where
        I: IntoIterator<Item = (K, FlatValue)>,
        K: Into<String>,
    {
        Self {
            settings: settings.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            lookup,
            container: DEFAULT_CONTAINER.to_string(),
            cached: OnceLock::new(),
        }
    }

    /// Mount the widget into `container` instead of the default selector.
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Return the memoized configuration, assembling it on first use.
    pub fn config(&self) -> Result<&GalleryConfig, MediaError> {
        if let Some(cfg) = self.cached.get() {
            return Ok(cfg);
        }

        let cloud_name = self.lookup.cloud_name().map_err(|e| {
            tracing::warn!("cloud name lookup failed: {:#}", e);
            MediaError::LookupFailure(format!("{:#}", e))
        })?;

        let cfg = assemble_in(
            self.settings.iter().cloned(),
            &cloud_name,
            self.custom_settings()?,
            &self.container,
        )?;
        Ok(self.cached.get_or_init(|| cfg))
    }

    /// Memoized configuration serialized for embedding in a page.
    pub fn embed_literal(&self) -> Result<String, MediaError> {
        Ok(self.config()?.to_embed_literal())
    }

    /// Raw overlay text; a non-string `custom_settings` value cannot hold
    /// JSON and is rejected.
    fn custom_settings(&self) -> Result<Option<&str>, MediaError> {
        let entry = self
            .settings
            .iter()
            .rev()
            .find(|(key, _)| to_lower_camel(key) == CUSTOM_SETTINGS_KEY);
        match entry {
            None => Ok(None),
            Some((_, FlatValue::Str(raw))) => Ok(Some(raw.as_str())),
            Some((key, other)) => Err(invalid_overlay(format!(
                "{} must be JSON text, found {:?}",
                key, other
            ))),
        }
    }
}

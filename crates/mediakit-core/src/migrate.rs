//! Bulk migration of legacy delivery URLs to stored asset records.
//!
//! Each input is resolved independently (see [`resolve_locator`]), so a batch
//! is split into contiguous chunks and parsed on scoped worker threads.
//! Output order always matches input order. Persisting the records, and any
//! per-field signatures, is left to the caller's metadata store.

use serde::{Deserialize, Serialize};

use crate::config::MigrationConfig;
use crate::error::MediaError;
use crate::locator::resolve_locator;
use crate::transform::{TransformRecognizer, Transformation};

/// Opaque identifier of the record being migrated.
pub type RecordId = u64;

/// One legacy asset awaiting migration.
#[derive(Debug, Clone)]
pub struct MigrationInput {
    pub record_id: RecordId,
    /// Legacy delivery URL.
    pub url: String,
    /// Public identifier already stored for the record, if any.
    pub stored_public_id: Option<String>,
}

/// Fields written to the metadata store for a migrated asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub public_id: String,
    pub version: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformation: Vec<Transformation>,
    pub plugin_version: String,
}

/// Result for one input of a batch.
#[derive(Debug)]
pub struct MigrationOutcome {
    pub record_id: RecordId,
    pub result: Result<MigrationRecord, MediaError>,
}

/// Migrate a single legacy asset.
pub fn migrate_one<R>(
    input: &MigrationInput,
    recognizer: &R,
    plugin_version: &str,
) -> Result<MigrationRecord, MediaError>
where
    R: TransformRecognizer + ?Sized,
{
    let locator = resolve_locator(&input.url, input.stored_public_id.as_deref(), recognizer)?;
    Ok(MigrationRecord {
        public_id: locator.public_id,
        version: locator.version,
        transformation: locator.transformations,
        plugin_version: plugin_version.to_string(),
    })
}

/// Migrate a batch of legacy assets using up to `cfg.workers` threads.
pub fn migrate_batch<R>(
    inputs: &[MigrationInput],
    recognizer: &R,
    cfg: &MigrationConfig,
) -> Vec<MigrationOutcome>
where
    R: TransformRecognizer + Sync + ?Sized,
{
    if inputs.is_empty() {
        return Vec::new();
    }
    let workers = cfg.workers.max(1).min(inputs.len());
    let chunk_len = inputs.len().div_ceil(workers);

    let run_chunk = |chunk: &[MigrationInput]| -> Vec<MigrationOutcome> {
        chunk
            .iter()
            .map(|input| {
                let result = migrate_one(input, recognizer, &cfg.plugin_version);
                if let Err(e) = &result {
                    tracing::warn!(record_id = input.record_id, "migration skipped: {}", e);
                }
                MigrationOutcome {
                    record_id: input.record_id,
                    result,
                }
            })
            .collect()
    };

    if workers == 1 {
        return run_chunk(inputs);
    }

    let outcomes: Vec<MigrationOutcome> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .chunks(chunk_len)
            .map(|chunk| s.spawn(move || run_chunk(chunk)))
            .collect();
        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(chunk) => chunk,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let migrated = outcomes.iter().filter(|o| o.result.is_ok()).count();
    tracing::info!(
        total = inputs.len(),
        migrated,
        workers,
        "legacy migration batch finished"
    );
    outcomes
}

use thiserror::Error;

/// Error types for the project store.
///
/// Lookup misses are never errors: mutation operations report a missing
/// target through their `Option` / `bool` return values. These variants
/// cover the snapshot persistence only.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine data directory")]
    NoDataDir,
}

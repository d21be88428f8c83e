//! Artifact read errors.

use std::path::PathBuf;

use crate::encode::EncodeError;
use crate::forest::TreeValidationError;

/// Errors from loading and validating the persisted artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Could not read the artifact file.
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for the expected schema.
    #[error("failed to parse artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact was written by an unknown schema version.
    #[error("unsupported artifact version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A tree in the model failed structural validation.
    #[error("invalid tree {tree}: {source}")]
    Tree {
        tree: usize,
        #[source]
        source: TreeValidationError,
    },

    /// The artifact parsed but its contents are inconsistent.
    #[error("invalid artifact: {0}")]
    Validation(String),

    /// A vocabulary in the artifact is malformed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

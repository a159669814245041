use std::io;

use thiserror::Error;

use crate::record::QualificationLevel;

/// Error type for partition retrieval and payload decoding failures.
///
/// All failures are local to a single partition fetch; the transformation
/// core itself degrades to empty results rather than erroring.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("partition '{level}' is unavailable: {reason}")]
    PartitionUnavailable {
        level: QualificationLevel,
        reason: String,
    },
    #[error("partition '{level}' returned an unusable payload: {details}")]
    InvalidPayload {
        level: QualificationLevel,
        details: String,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

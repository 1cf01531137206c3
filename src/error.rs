use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading data, clustering, or evaluating.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{origin}:{line}: invalid token `{token}`: {reason}")]
    Parse {
        origin: String,
        line: usize,
        token: String,
        reason: String,
    },

    #[error("dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("cluster {cluster} has no members after iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },

    #[error("training data contains no examples")]
    EmptyTrainingData,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for k-means operations
pub type Result<T> = std::result::Result<T, Error>;

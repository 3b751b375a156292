use std::path::PathBuf;

use thiserror::Error;
use ytsent_core::{AggregateError, DistributionError};

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend could not score a comment. Never replaced by a default
    /// distribution.
    #[error("classification error: {0}")]
    Classification(String),

    #[error("classifier produced an invalid distribution: {0}")]
    Distribution(#[from] DistributionError),

    #[error("aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

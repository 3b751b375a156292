use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when a vector does not form a valid probability distribution.
#[derive(Debug, Error, PartialEq)]
pub enum DistributionError {
    #[error("distribution has no components")]
    Empty,

    #[error("component {index} is not finite")]
    NonFinite { index: usize },

    #[error("component {index} is negative ({value})")]
    Negative { index: usize, value: f64 },

    #[error("components sum to {sum}, expected 1")]
    NotNormalized { sum: f64 },
}

/// Errors raised by the likes-weighted aggregator.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    /// The mean of zero comments is undefined.
    #[error("cannot aggregate an empty batch of comments")]
    EmptyBatch,

    /// The likes coefficient must lie in `[0, 1)`.
    #[error("likes coefficient {0} is outside [0, 1)")]
    InvalidCoefficient(f64),

    #[error("comment {index} has no like count and the missing-likes policy is `reject`")]
    MissingLikes { index: usize },

    #[error("comment {index} has {found} sentiment components, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

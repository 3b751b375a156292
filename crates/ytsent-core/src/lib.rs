//! Core types and algorithms for ytsent.
//!
//! Holds the comment and sentiment data model, the text normalizer applied
//! before classification, the likes-weighted aggregator, report formatting,
//! and environment-driven application configuration. Nothing in this crate
//! performs I/O beyond reading environment variables.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod error;
pub mod normalize;
pub mod report;
pub mod types;

pub use aggregate::{
    aggregate, comment_weights, AggregateResult, LikesCoefficient, MissingLikesPolicy,
    ScoredComment, WeightingConfig,
};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{AggregateError, ConfigError, DistributionError};
pub use normalize::normalize_text;
pub use report::{format_distribution, format_summary, format_trace};
pub use types::{Comment, LabelSet, SentimentDistribution};

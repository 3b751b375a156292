use std::path::PathBuf;

use crate::aggregate::{LikesCoefficient, MissingLikesPolicy, WeightingConfig};
use crate::types::LabelSet;
use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: String,
    pub classifier_url: String,
    pub label_set: LabelSet,
    pub likes_coefficient: LikesCoefficient,
    pub missing_likes: MissingLikesPolicy,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub classifier_batch_size: usize,
    pub max_comments: usize,
}

impl AppConfig {
    /// The `YouTube` API key, required by every command that fetches comments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `YOUTUBE_API_KEY` is unset or
    /// blank.
    pub fn require_youtube_api_key(&self) -> Result<&str, ConfigError> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))
    }

    /// Aggregation parameters derived from this configuration.
    #[must_use]
    pub fn weighting(&self) -> WeightingConfig {
        WeightingConfig::new(self.likes_coefficient).with_missing_likes(self.missing_likes)
    }

    /// Directory where fetched comment files are written.
    #[must_use]
    pub fn comments_dir(&self) -> PathBuf {
        self.output_dir.join("comments")
    }

    /// Directory where per-comment analysis exports are written.
    #[must_use]
    pub fn analysis_dir(&self) -> PathBuf {
        self.output_dir.join("sentiment_analysis")
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field("classifier_url", &self.classifier_url)
            .field("label_set", &self.label_set)
            .field("likes_coefficient", &self.likes_coefficient.value())
            .field("missing_likes", &self.missing_likes)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("classifier_batch_size", &self.classifier_batch_size)
            .field("max_comments", &self.max_comments)
            .finish()
    }
}

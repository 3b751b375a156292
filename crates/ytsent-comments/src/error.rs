use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while fetching, reading, or writing comments.
#[derive(Debug, Error)]
pub enum CommentsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The `YouTube` API answered with a non-2xx status.
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid video URL \"{url}\": {reason}")]
    InvalidVideoUrl { url: String, reason: String },

    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("pagination limit reached for video {video_id}: exceeded {max_pages} pages")]
    PaginationLimit { video_id: String, max_pages: usize },

    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed comment file {}: {source}", .path.display())]
    FileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

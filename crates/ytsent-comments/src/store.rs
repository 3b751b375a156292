//! JSON comment files.
//!
//! A comment file is a JSON array of `{ "text": ..., "likes": ... }` records;
//! `likes` may be absent.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use ytsent_core::Comment;

use crate::error::CommentsError;

/// Read a comment file.
///
/// # Errors
///
/// Returns [`CommentsError::Io`] if the file cannot be read and
/// [`CommentsError::FileFormat`] if it is not a JSON array of comments.
pub fn load_comments(path: &Path) -> Result<Vec<Comment>, CommentsError> {
    let content = std::fs::read_to_string(path).map_err(|e| CommentsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CommentsError::FileFormat {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `comments` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`CommentsError::Io`] if the directory or file cannot be written.
pub fn save_comments(path: &Path, comments: &[Comment]) -> Result<(), CommentsError> {
    let io_err = |source: std::io::Error| CommentsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(comments).map_err(|e| CommentsError::FileFormat {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(io_err)?;

    tracing::info!(path = %path.display(), count = comments.len(), "comments saved");
    Ok(())
}

/// `<dir>/<prefix>_YYYY-MM-DD_HH-MM-SS.<ext>` for the given instant.
#[must_use]
pub fn timestamped_path<Tz>(dir: &Path, prefix: &str, ext: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stamp = now.format("%Y-%m-%d_%H-%M-%S");
    dir.join(format!("{prefix}_{stamp}.{ext}"))
}

/// Turn a `;`-separated plain-text list into comments without like counts.
///
/// Each segment is trimmed; empty segments are skipped.
#[must_use]
pub fn parse_semicolon_list(raw: &str) -> Vec<Comment> {
    raw.trim()
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Comment::new(s, None))
        .collect()
}

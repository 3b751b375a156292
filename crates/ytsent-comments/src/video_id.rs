use reqwest::Url;

use crate::error::CommentsError;

/// Extract the video ID from a `YouTube` URL.
///
/// `https://youtu.be/<id>` yields the path; any other URL yields its `v`
/// query parameter (`https://www.youtube.com/watch?v=<id>`).
///
/// # Errors
///
/// Returns [`CommentsError::InvalidVideoUrl`] if the URL does not parse or
/// carries no video ID.
pub fn video_id_from_url(video_url: &str) -> Result<String, CommentsError> {
    let invalid = |reason: String| CommentsError::InvalidVideoUrl {
        url: video_url.to_string(),
        reason,
    };

    let parsed = Url::parse(video_url.trim()).map_err(|e| invalid(e.to_string()))?;

    let id = if parsed.host_str() == Some("youtu.be") {
        parsed.path().trim_start_matches('/').to_string()
    } else {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    };

    if id.is_empty() {
        return Err(invalid("no video id found".to_string()));
    }
    Ok(id)
}

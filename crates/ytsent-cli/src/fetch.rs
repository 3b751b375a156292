//! `fetch` command: download comments for a video into a comment file.

use std::path::Path;

use chrono::Local;
use ytsent_comments::{save_comments, timestamped_path, video_id_from_url, YoutubeClient};
use ytsent_core::{AppConfig, Comment};

/// Build a `YouTube` client from configuration.
///
/// # Errors
///
/// Returns an error if `YOUTUBE_API_KEY` is not set or the client cannot be
/// constructed.
pub(crate) fn youtube_client(config: &AppConfig) -> anyhow::Result<YoutubeClient> {
    let api_key = config.require_youtube_api_key()?;
    let client = YoutubeClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.youtube_base_url,
    )?
    .with_retry_policy(config.max_retries, config.retry_backoff_base_ms);
    Ok(client)
}

/// Resolve `url` to a video id and fetch up to `max_results` comments
/// (defaulting to the configured maximum).
pub(crate) async fn fetch_video_comments(
    config: &AppConfig,
    url: &str,
    max_results: Option<usize>,
) -> anyhow::Result<Vec<Comment>> {
    let video_id = video_id_from_url(url)?;
    let client = youtube_client(config)?;
    let max_results = max_results.unwrap_or(config.max_comments);
    let comments = client.fetch_comments(&video_id, max_results).await?;
    Ok(comments)
}

pub(crate) async fn run_fetch(
    config: &AppConfig,
    url: &str,
    max_results: Option<usize>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let comments = fetch_video_comments(config, url, max_results).await?;
    let path = output.map_or_else(
        || timestamped_path(&config.comments_dir(), "comments", "json", &Local::now()),
        Path::to_path_buf,
    );
    save_comments(&path, &comments)?;
    println!("Saved {} comments to {}", comments.len(), path.display());
    Ok(())
}

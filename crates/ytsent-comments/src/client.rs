//! HTTP client for the `YouTube` Data API v3 `commentThreads` endpoint.
//!
//! Wraps `reqwest` with API key management, typed response
//! deserialization, retry on transient failures, and `nextPageToken`
//! pagination.

use std::time::Duration;

use reqwest::{Client, Url};
use ytsent_core::Comment;

use crate::error::CommentsError;
use crate::retry::retry_with_backoff;
use crate::text::strip_emojis;
use crate::types::{ApiErrorEnvelope, CommentThreadListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Largest `maxResults` the API accepts for `commentThreads.list`.
pub const MAX_PAGE_SIZE: usize = 100;

/// Maximum number of pages to fetch for one video.
/// Prevents infinite loops on cycling page tokens.
const MAX_PAGES: usize = 500;

/// One page of comments and the token for the next page, if any.
#[derive(Debug)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub next_page_token: Option<String>,
}

/// Client for the `YouTube` Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`CommentsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CommentsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// Retries default to 3 attempts with a 1 s back-off base; see
    /// [`YoutubeClient::with_retry_policy`].
    ///
    /// # Errors
    ///
    /// Returns [`CommentsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CommentsError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CommentsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining "commentThreads" appends a
        // path segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CommentsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy for transient failures.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure; `0` disables retries.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches one page of top-level comments ordered by relevance.
    ///
    /// `page_size` is clamped to `1..=100`. Comment text has emojis stripped.
    ///
    /// # Errors
    ///
    /// - [`CommentsError::Api`] for a non-2xx status (after retries for 429/5xx).
    /// - [`CommentsError::Http`] on network failure after retries.
    /// - [`CommentsError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_comment_page(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<CommentPage, CommentsError> {
        let url = self.comment_threads_url(video_id, page_size, page_token)?;

        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.request_page(url).await }
        })
        .await?;

        let comments = response
            .items
            .into_iter()
            .map(|thread| {
                let snippet = thread.snippet.top_level_comment.snippet;
                Comment::new(strip_emojis(&snippet.text_display), snippet.like_count)
            })
            .collect();

        Ok(CommentPage {
            comments,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    /// Fetches up to `max_results` comments for a video, following page tokens.
    ///
    /// A failure on the first page is returned as an error. A failure on a
    /// later page is logged and the comments collected so far are returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_comment_page`] on the first
    /// page. Returns [`CommentsError::PaginationLimit`] if the page limit is
    /// exceeded.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_results: usize,
    ) -> Result<Vec<Comment>, CommentsError> {
        let mut comments: Vec<Comment> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        while comments.len() < max_results {
            if page_count >= MAX_PAGES {
                return Err(CommentsError::PaginationLimit {
                    video_id: video_id.to_string(),
                    max_pages: MAX_PAGES,
                });
            }

            let page_size = (max_results - comments.len()).min(MAX_PAGE_SIZE);
            let page = match self
                .fetch_comment_page(video_id, page_size, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) if !comments.is_empty() => {
                    tracing::warn!(
                        video_id,
                        collected = comments.len(),
                        error = %e,
                        "comment page fetch failed; returning partial results"
                    );
                    break;
                }
                Err(e) => return Err(e),
            };
            page_count += 1;

            tracing::debug!(
                video_id,
                page = page_count,
                count = page.comments.len(),
                "fetched comment page"
            );
            comments.extend(page.comments);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        comments.truncate(max_results);
        tracing::info!(video_id, count = comments.len(), "comments fetched");
        Ok(comments)
    }

    /// Builds the `commentThreads` URL with percent-encoded query parameters.
    fn comment_threads_url(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<Url, CommentsError> {
        let mut url =
            self.base_url
                .join("commentThreads")
                .map_err(|e| CommentsError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        {
            let page_size = page_size.clamp(1, MAX_PAGE_SIZE).to_string();
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("textFormat", "plainText");
            pairs.append_pair("part", "snippet");
            pairs.append_pair("videoId", video_id);
            pairs.append_pair("maxResults", &page_size);
            pairs.append_pair("order", "relevance");
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }

    /// Sends one GET request and parses the body, mapping non-2xx statuses
    /// to [`CommentsError::Api`] with the API's error message.
    async fn request_page(&self, url: Url) -> Result<CommentThreadListResponse, CommentsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(CommentsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| CommentsError::Deserialize {
            context: "commentThreads.list".to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

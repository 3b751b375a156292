//! Comment sources for ytsent.
//!
//! Fetches top-level comments and like counts from the `YouTube` Data API v3
//! `commentThreads` endpoint, and reads and writes the JSON comment files the
//! rest of the pipeline consumes.

pub mod client;
pub mod error;
pub mod store;
pub mod text;
pub mod types;
pub mod video_id;

mod retry;

pub use client::{CommentPage, YoutubeClient};
pub use error::CommentsError;
pub use store::{load_comments, parse_semicolon_list, save_comments, timestamped_path};
pub use text::strip_emojis;
pub use video_id::video_id_from_url;

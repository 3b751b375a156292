//! Sentiment classification and analysis for ytsent.
//!
//! Classifies normalized comment text through a [`SentimentBackend`]
//! (a TEI `/predict` endpoint in production), weights each comment by its
//! like count, and aggregates the batch into one distribution. Per-comment
//! results can be exported as JSON and CSV.

pub mod backend;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod tei;

pub use backend::SentimentBackend;
pub use error::SentimentError;
pub use export::{analyzed_records, export_analysis, AnalyzedComment, ExportPaths};
pub use pipeline::{analyze_comments, classify_text, CommentAnalysis, CommentScore};
pub use tei::TeiClassifier;

//! The classifier seam.

use std::future::Future;

use ytsent_core::{LabelSet, SentimentDistribution};

use crate::error::SentimentError;

/// Maps text to a probability distribution over a fixed, ordered label set.
///
/// Implementations receive text that has already been through
/// [`ytsent_core::normalize_text`], and must return proper distributions
/// (softmax-normalized), never raw logits. The three-class and five-star
/// models are interchangeable implementations differing only in
/// [`SentimentBackend::label_set`].
pub trait SentimentBackend: Send + Sync {
    /// Label order of every distribution this backend returns.
    fn label_set(&self) -> LabelSet;

    /// Classify `texts`, returning one distribution per input in input order.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if any text cannot be scored; no partial
    /// results are returned.
    fn classify_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<SentimentDistribution>, SentimentError>> + Send;

    /// Classify a single text.
    ///
    /// # Errors
    ///
    /// Same as [`SentimentBackend::classify_batch`].
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<SentimentDistribution, SentimentError>> + Send {
        async move {
            let texts = [text.to_owned()];
            self.classify_batch(&texts).await?.pop().ok_or_else(|| {
                SentimentError::Classification("backend returned no result".to_string())
            })
        }
    }
}

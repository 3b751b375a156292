//! Analysis pipeline orchestration.

use ytsent_core::{
    aggregate, comment_weights, normalize_text, AggregateError, AggregateResult, Comment,
    LabelSet, MissingLikesPolicy, ScoredComment, SentimentDistribution, WeightingConfig,
};

use crate::backend::SentimentBackend;
use crate::error::SentimentError;

/// One classified comment with the weight it carried in the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentScore {
    /// Comment text as received, before normalization.
    pub text: String,
    pub likes: Option<u64>,
    pub distribution: SentimentDistribution,
    pub weight: f64,
}

/// Result of analyzing one batch of comments.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentAnalysis {
    pub label_set: LabelSet,
    pub aggregate: AggregateResult,
    /// Per-comment results, in input order.
    pub comments: Vec<CommentScore>,
}

/// Classify a batch of comments and aggregate them by likes.
///
/// 1. Normalize every text and classify the whole batch.
/// 2. Weight each comment by its like count and aggregate.
///
/// Every comment takes part, including ones whose text is blank (emoji-only
/// comments end up empty after stripping), so `L_max` is taken over the
/// complete batch. The weighting configuration is checked before the backend
/// is called.
///
/// # Errors
///
/// - [`SentimentError::Aggregate`] with [`AggregateError::EmptyBatch`] if
///   `comments` is empty, or [`AggregateError::MissingLikes`] under the
///   reject policy.
/// - [`SentimentError::Classification`] if the backend fails or returns the
///   wrong number or shape of distributions.
pub async fn analyze_comments<B: SentimentBackend>(
    backend: &B,
    comments: &[Comment],
    config: &WeightingConfig,
) -> Result<CommentAnalysis, SentimentError> {
    if comments.is_empty() {
        return Err(AggregateError::EmptyBatch.into());
    }
    if config.missing_likes == MissingLikesPolicy::Reject {
        if let Some(index) = comments.iter().position(|c| c.likes.is_none()) {
            return Err(AggregateError::MissingLikes { index }.into());
        }
    }

    let label_set = backend.label_set();

    let texts: Vec<String> = comments.iter().map(|c| normalize_text(&c.text)).collect();
    tracing::info!(count = texts.len(), %label_set, "classifying comments");
    let distributions = backend.classify_batch(&texts).await?;

    if distributions.len() != comments.len() {
        return Err(SentimentError::Classification(format!(
            "backend returned {} distributions for {} comments",
            distributions.len(),
            comments.len()
        )));
    }
    if let Some(bad) = distributions.iter().find(|d| d.len() != label_set.len()) {
        return Err(SentimentError::Classification(format!(
            "backend returned {} scores for the {} {label_set} labels",
            bad.len(),
            label_set.len()
        )));
    }

    let scored: Vec<ScoredComment> = comments
        .iter()
        .zip(distributions)
        .map(|(c, distribution)| ScoredComment {
            distribution,
            likes: c.likes,
        })
        .collect();
    let weights = comment_weights(&scored, config)?;
    let aggregate = aggregate(&scored, config)?;

    let comments = comments
        .iter()
        .zip(scored)
        .zip(weights)
        .map(|((comment, s), weight)| CommentScore {
            text: comment.text.clone(),
            likes: comment.likes,
            distribution: s.distribution,
            weight,
        })
        .collect();

    tracing::info!(
        count = aggregate.comment_count,
        total_weight = aggregate.total_weight,
        "aggregated comment sentiment"
    );

    Ok(CommentAnalysis {
        label_set,
        aggregate,
        comments,
    })
}

/// Normalize and classify one piece of free text.
///
/// # Errors
///
/// Returns [`SentimentError::Classification`] if the backend fails.
pub async fn classify_text<B: SentimentBackend>(
    backend: &B,
    text: &str,
) -> Result<SentimentDistribution, SentimentError> {
    backend.classify(&normalize_text(text)).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ytsent_core::LikesCoefficient;

    use super::*;

    /// Scores "good" texts positive and everything else negative, recording
    /// what it was asked to classify.
    struct KeywordBackend {
        seen: Mutex<Vec<String>>,
        drop_last: bool,
    }

    impl KeywordBackend {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                drop_last: false,
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl SentimentBackend for KeywordBackend {
        fn label_set(&self) -> LabelSet {
            LabelSet::ThreeClass
        }

        async fn classify_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<SentimentDistribution>, SentimentError> {
            self.seen.lock().unwrap().extend(texts.iter().cloned());
            let mut out: Vec<SentimentDistribution> = texts
                .iter()
                .map(|t| {
                    let values = if t.contains("good") {
                        vec![0.1, 0.1, 0.8]
                    } else {
                        vec![0.8, 0.1, 0.1]
                    };
                    SentimentDistribution::new(values).unwrap()
                })
                .collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }
    }

    fn half() -> WeightingConfig {
        WeightingConfig::new(LikesCoefficient::new(0.5).unwrap())
    }

    #[tokio::test]
    async fn weighted_aggregate_matches_worked_example() {
        let backend = KeywordBackend::new();
        let comments = vec![
            Comment::new("good stuff", Some(0)),
            Comment::new("terrible", Some(100)),
        ];
        let analysis = analyze_comments(&backend, &comments, &half())
            .await
            .unwrap();

        let expected = [1.7 / 3.0, 0.1, 1.0 / 3.0];
        for (a, e) in analysis.aggregate.distribution.as_slice().iter().zip(expected) {
            assert!((a - e).abs() < 1e-9);
        }
        assert_eq!(analysis.comments.len(), 2);
        assert!((analysis.comments[0].weight - 1.0).abs() < 1e-12);
        assert!((analysis.comments[1].weight - 2.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn texts_are_normalized_before_classification() {
        let backend = KeywordBackend::new();
        let comments = vec![Comment::new("@bob good https://x.y", Some(1))];
        let analysis = analyze_comments(&backend, &comments, &half())
            .await
            .unwrap();
        assert_eq!(backend.seen(), vec!["@user good http".to_string()]);
        assert_eq!(analysis.comments[0].text, "@bob good https://x.y");
    }

    #[tokio::test]
    async fn blank_comments_count_toward_weighting() {
        let backend = KeywordBackend::new();
        let comments = vec![
            Comment::new("", Some(1000)),
            Comment::new("good", Some(10)),
            Comment::new("bad", Some(0)),
        ];
        let analysis = analyze_comments(&backend, &comments, &half())
            .await
            .unwrap();

        assert_eq!(backend.seen().len(), 3);
        assert_eq!(analysis.aggregate.comment_count, 3);
        // L_max = 1000, k = 1: weights 2, 1.01, 1.
        let weights: Vec<f64> = analysis.comments.iter().map(|c| c.weight).collect();
        for (w, e) in weights.iter().zip([2.0, 1.01, 1.0]) {
            assert!((w - e).abs() < 1e-12, "{weights:?}");
        }
        // Blank and "bad" score negative, "good" positive.
        let p = analysis.aggregate.distribution.as_slice();
        let total = 4.01;
        assert!((p[0] - (0.8 * 3.0 + 0.1 * 1.01) / total).abs() < 1e-9, "{p:?}");
        assert!((p[2] - (0.1 * 3.0 + 0.8 * 1.01) / total).abs() < 1e-9, "{p:?}");
    }

    #[tokio::test]
    async fn empty_batch_fails_before_classification() {
        let backend = KeywordBackend::new();
        let err = analyze_comments(&backend, &[], &half())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SentimentError::Aggregate(AggregateError::EmptyBatch)
        ));
        assert!(backend.seen().is_empty());
    }

    #[tokio::test]
    async fn reject_policy_fails_before_classification() {
        let backend = KeywordBackend::new();
        let config = half().with_missing_likes(MissingLikesPolicy::Reject);
        let comments = vec![
            Comment::new("  ", Some(1)),
            Comment::new("good", Some(3)),
            Comment::new("bad", None),
        ];
        let err = analyze_comments(&backend, &comments, &config)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SentimentError::Aggregate(AggregateError::MissingLikes { index: 2 })
        ));
        assert!(backend.seen().is_empty());
    }

    #[tokio::test]
    async fn short_backend_response_is_classification_error() {
        let mut backend = KeywordBackend::new();
        backend.drop_last = true;
        let comments = vec![Comment::new("good", Some(1)), Comment::new("bad", Some(2))];
        let err = analyze_comments(&backend, &comments, &half())
            .await
            .unwrap_err();
        assert!(matches!(err, SentimentError::Classification(_)));
    }

    #[tokio::test]
    async fn classify_text_normalizes_input() {
        let backend = KeywordBackend::new();
        let dist = classify_text(&backend, "@someone good").await.unwrap();
        assert_eq!(dist.argmax(), 2);
        assert_eq!(backend.seen(), vec!["@user good".to_string()]);
    }
}

//! TEI (Text Embeddings Inference) client for sequence classification.
//!
//! Talks to the `/predict` route of a TEI server hosting a sentiment model
//! such as `cardiffnlp/twitter-roberta-base-sentiment-latest` (three classes)
//! or `nlptown/bert-base-multilingual-uncased-sentiment` (one to five stars).
//! Raw logits are requested and softmax-normalized locally.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ytsent_core::{LabelSet, SentimentDistribution};

use crate::backend::SentimentBackend;
use crate::error::SentimentError;

/// Default number of texts per `/predict` call.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Sentiment backend backed by a TEI server.
pub struct TeiClassifier {
    client: reqwest::Client,
    url: String,
    label_set: LabelSet,
    batch_size: usize,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    /// One single-sequence entry per text: `[["a"], ["b"]]`.
    inputs: Vec<[&'a str; 1]>,
    raw_scores: bool,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Batch(Vec<Vec<Prediction>>),
    Single(Vec<Prediction>),
}

impl TeiClassifier {
    /// Create a classifier for the TEI server at `tei_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        tei_url: &str,
        label_set: LabelSet,
        timeout_secs: u64,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/predict", tei_url.trim_end_matches('/')),
            label_set,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Override the number of texts sent per request (minimum 1).
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    async fn predict_chunk(
        &self,
        chunk: &[String],
    ) -> Result<Vec<SentimentDistribution>, SentimentError> {
        let request = PredictRequest {
            inputs: chunk.iter().map(|t| [t.as_str()]).collect(),
            raw_scores: true,
        };
        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::Classification(format!(
                "TEI returned status {status}: {body}"
            )));
        }

        let parsed: PredictResponse = response.json().await.map_err(|e| {
            SentimentError::Classification(format!("TEI response parse error: {e}"))
        })?;
        let results = match parsed {
            PredictResponse::Batch(results) => results,
            PredictResponse::Single(result) => vec![result],
        };

        if results.len() != chunk.len() {
            return Err(SentimentError::Classification(format!(
                "TEI returned {} results for {} inputs",
                results.len(),
                chunk.len()
            )));
        }

        results
            .into_iter()
            .map(|predictions| to_distribution(self.label_set, predictions))
            .collect()
    }
}

impl SentimentBackend for TeiClassifier {
    fn label_set(&self) -> LabelSet {
        self.label_set
    }

    async fn classify_batch(
        &self,
        texts: &[String],
    ) -> Result<Vec<SentimentDistribution>, SentimentError> {
        let mut distributions = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            distributions.extend(self.predict_chunk(chunk).await?);
        }
        tracing::debug!(count = distributions.len(), "classified texts via TEI");
        Ok(distributions)
    }
}

/// Position of a model output label within `label_set`.
///
/// Accepts the model's own names (`negative`, `2 stars`, ...) as well as
/// generic `LABEL_<i>` ids.
fn label_index(label_set: LabelSet, label: &str) -> Option<usize> {
    let label = label.trim().to_ascii_lowercase();

    if let Some(id) = label.strip_prefix("label_") {
        return id.parse::<usize>().ok().filter(|&i| i < label_set.len());
    }

    match label_set {
        LabelSet::ThreeClass => match label.as_str() {
            "negative" | "neg" => Some(0),
            "neutral" | "neu" => Some(1),
            "positive" | "pos" => Some(2),
            _ => None,
        },
        LabelSet::FiveStar => {
            let mut parts = label.split_whitespace();
            let stars = parts.next()?.parse::<usize>().ok()?;
            let unit = parts.next()?;
            (unit.starts_with("star") && (1..=5).contains(&stars)).then(|| stars - 1)
        }
    }
}

/// Order one text's predictions by label and softmax the logits.
fn to_distribution(
    label_set: LabelSet,
    predictions: Vec<Prediction>,
) -> Result<SentimentDistribution, SentimentError> {
    if predictions.len() != label_set.len() {
        return Err(SentimentError::Classification(format!(
            "expected {} labels for {label_set} model, got {}",
            label_set.len(),
            predictions.len()
        )));
    }

    let mut logits: Vec<Option<f64>> = vec![None; label_set.len()];
    for prediction in predictions {
        let index = label_index(label_set, &prediction.label).ok_or_else(|| {
            SentimentError::Classification(format!(
                "unknown label '{}' for {label_set} model",
                prediction.label
            ))
        })?;
        if logits[index].replace(prediction.score).is_some() {
            return Err(SentimentError::Classification(format!(
                "duplicate label '{}'",
                prediction.label
            )));
        }
    }

    let logits: Vec<f64> = logits.into_iter().collect::<Option<_>>().ok_or_else(|| {
        SentimentError::Classification("model output is missing a label".to_string())
    })?;
    Ok(SentimentDistribution::from_logits(&logits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(label: &str, score: f64) -> Prediction {
        Prediction {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn three_class_names_map_in_order() {
        assert_eq!(label_index(LabelSet::ThreeClass, "negative"), Some(0));
        assert_eq!(label_index(LabelSet::ThreeClass, "Neutral"), Some(1));
        assert_eq!(label_index(LabelSet::ThreeClass, "POSITIVE"), Some(2));
        assert_eq!(label_index(LabelSet::ThreeClass, "mixed"), None);
    }

    #[test]
    fn generic_label_ids_map_by_number() {
        assert_eq!(label_index(LabelSet::ThreeClass, "LABEL_2"), Some(2));
        assert_eq!(label_index(LabelSet::ThreeClass, "LABEL_3"), None);
        assert_eq!(label_index(LabelSet::FiveStar, "LABEL_4"), Some(4));
    }

    #[test]
    fn star_labels_map_to_zero_based_index() {
        assert_eq!(label_index(LabelSet::FiveStar, "1 star"), Some(0));
        assert_eq!(label_index(LabelSet::FiveStar, "5 stars"), Some(4));
        assert_eq!(label_index(LabelSet::FiveStar, "6 stars"), None);
        assert_eq!(label_index(LabelSet::FiveStar, "0 stars"), None);
        assert_eq!(label_index(LabelSet::FiveStar, "positive"), None);
    }

    #[test]
    fn predictions_are_reordered_and_softmaxed() {
        // TEI sorts predictions by score, not by label.
        let dist = to_distribution(
            LabelSet::ThreeClass,
            vec![
                pred("positive", 2.0),
                pred("negative", 0.0),
                pred("neutral", 0.0),
            ],
        )
        .unwrap();
        let p = dist.as_slice();
        assert!((p[0] - p[1]).abs() < 1e-12);
        assert!(p[2] > p[0]);
        let sum: f64 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_label_count_is_classification_error() {
        let err = to_distribution(
            LabelSet::FiveStar,
            vec![pred("negative", 0.1), pred("positive", 0.9)],
        )
        .unwrap_err();
        assert!(matches!(err, SentimentError::Classification(_)));
    }

    #[test]
    fn duplicate_label_is_classification_error() {
        let err = to_distribution(
            LabelSet::ThreeClass,
            vec![
                pred("negative", 0.1),
                pred("negative", 0.2),
                pred("positive", 0.9),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SentimentError::Classification(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn request_serializes_as_batch_of_single_sequences() {
        let texts = ["a".to_string(), "b".to_string()];
        let request = PredictRequest {
            inputs: texts.iter().map(|t| [t.as_str()]).collect(),
            raw_scores: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"inputs": [["a"], ["b"]], "raw_scores": true})
        );
    }

    #[test]
    fn predict_url_strips_trailing_slash() {
        let classifier =
            TeiClassifier::new("http://localhost:8080/", LabelSet::ThreeClass, 5).unwrap();
        assert_eq!(classifier.url, "http://localhost:8080/predict");
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DistributionError;

/// Absolute tolerance used when checking that a distribution sums to 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A single public comment as fetched from the platform or read from a file.
///
/// `likes` is `None` when the source record carried no like count; how such
/// comments are weighted is decided by [`crate::MissingLikesPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
}

impl Comment {
    #[must_use]
    pub fn new(text: impl Into<String>, likes: Option<u64>) -> Self {
        Self {
            text: text.into(),
            likes,
        }
    }
}

/// A probability vector over an ordered set of sentiment labels.
///
/// Every component is finite and non-negative, and the components sum to 1
/// within [`SUM_TOLERANCE`]. Classifier logits must go through
/// [`SentimentDistribution::from_logits`]; they are never a valid
/// distribution on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SentimentDistribution(Vec<f64>);

impl SentimentDistribution {
    /// Validate `values` as a probability distribution.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError`] if `values` is empty, contains a
    /// non-finite or negative component, or does not sum to 1.
    pub fn new(values: Vec<f64>) -> Result<Self, DistributionError> {
        check_components(&values)?;
        for (index, &value) in values.iter().enumerate() {
            if value < 0.0 {
                return Err(DistributionError::Negative { index, value });
            }
        }
        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DistributionError::NotNormalized { sum });
        }
        Ok(Self(values))
    }

    /// Turn raw classifier logits into a distribution with a softmax.
    ///
    /// The maximum logit is subtracted before exponentiating so large logits
    /// cannot overflow.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError`] if `logits` is empty or contains a
    /// non-finite value.
    pub fn from_logits(logits: &[f64]) -> Result<Self, DistributionError> {
        check_components(logits)?;
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        // exp(0) == 1 is always one of the terms, so the total is >= 1.
        let total: f64 = exps.iter().sum();
        Ok(Self(exps.into_iter().map(|e| e / total).collect()))
    }

    /// Wrap values the caller has already proven to be a distribution.
    pub(crate) fn from_parts_unchecked(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the most probable label. Ties resolve to the lowest index.
    #[must_use]
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.0.iter().enumerate().skip(1) {
            if p > self.0[best] {
                best = i;
            }
        }
        best
    }
}

impl TryFrom<Vec<f64>> for SentimentDistribution {
    type Error = DistributionError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<SentimentDistribution> for Vec<f64> {
    fn from(dist: SentimentDistribution) -> Self {
        dist.0
    }
}

fn check_components(values: &[f64]) -> Result<(), DistributionError> {
    if values.is_empty() {
        return Err(DistributionError::Empty);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(DistributionError::NonFinite { index });
    }
    Ok(())
}

const THREE_CLASS_LABELS: &[&str] = &["Negative", "Neutral", "Positive"];
const FIVE_STAR_LABELS: &[&str] = &[
    "Very Negative",
    "Negative",
    "Neutral",
    "Positive",
    "Very Positive",
];

/// The fixed, ordered label set a sentiment backend scores against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelSet {
    /// `Negative`, `Neutral`, `Positive`.
    ThreeClass,
    /// One to five stars, from `Very Negative` up to `Very Positive`.
    FiveStar,
}

impl LabelSet {
    /// Display names in model output order.
    #[must_use]
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            LabelSet::ThreeClass => THREE_CLASS_LABELS,
            LabelSet::FiveStar => FIVE_STAR_LABELS,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.labels().len()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.labels().is_empty()
    }

    /// Display name of the most probable label in `dist`.
    ///
    /// Returns `None` if `dist` does not match this label set's size.
    #[must_use]
    pub fn top_label(self, dist: &SentimentDistribution) -> Option<&'static str> {
        if dist.len() != self.len() {
            return None;
        }
        self.labels().get(dist.argmax()).copied()
    }

    /// Expected star rating `Σ (i + 1) · p_i`, in `[1, 5]`.
    ///
    /// Only defined for [`LabelSet::FiveStar`] distributions of length 5.
    #[must_use]
    pub fn star_rating(self, dist: &SentimentDistribution) -> Option<f64> {
        if self != LabelSet::FiveStar || dist.len() != self.len() {
            return None;
        }
        Some(
            dist.as_slice()
                .iter()
                .zip(1u32..)
                .map(|(p, stars)| p * f64::from(stars))
                .sum(),
        )
    }
}

impl std::fmt::Display for LabelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelSet::ThreeClass => write!(f, "three-class"),
            LabelSet::FiveStar => write!(f, "five-star"),
        }
    }
}

impl FromStr for LabelSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three-class" | "three_class" | "3" => Ok(LabelSet::ThreeClass),
            "five-star" | "five_star" | "5" => Ok(LabelSet::FiveStar),
            other => Err(format!(
                "unknown label set '{other}' (expected 'three-class' or 'five-star')"
            )),
        }
    }
}

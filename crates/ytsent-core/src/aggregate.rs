//! Likes-weighted aggregation of per-comment sentiment distributions.
//!
//! Every comment contributes with weight `w_i = 1 + m · likes_i`, where
//! `m = k / L_max`, `k = c / (1 - c)` and `L_max` is the largest like count
//! in the batch. The coefficient `c ∈ [0, 1)` maps onto `k ∈ [0, ∞)`: `c = 0`
//! ignores likes entirely and values close to 1 let the most-liked comments
//! dominate. Weights never drop below 1, so the normalizing sum is always
//! positive for a non-empty batch.

use std::str::FromStr;

use crate::error::AggregateError;
use crate::types::SentimentDistribution;

/// The likes coefficient `c`, guaranteed to lie in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikesCoefficient(f64);

impl LikesCoefficient {
    /// Likes are ignored; the aggregate is the plain mean.
    pub const ZERO: Self = Self(0.0);

    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidCoefficient`] if `value` is not a
    /// finite number in `[0, 1)`. `c = 1` would divide by zero when deriving
    /// the slope.
    pub fn new(value: f64) -> Result<Self, AggregateError> {
        if value.is_finite() && (0.0..1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AggregateError::InvalidCoefficient(value))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The unbounded slope `k = -c / (c - 1)`.
    #[must_use]
    pub fn slope(self) -> f64 {
        self.0 / (1.0 - self.0)
    }
}

impl TryFrom<f64> for LikesCoefficient {
    type Error = AggregateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How comments without a like count are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingLikesPolicy {
    /// A missing count is read as 0 likes, giving the comment the minimum
    /// weight of 1. `L_max` is taken over the counts that are present.
    #[default]
    TreatAsZero,
    /// A missing count fails the whole aggregation.
    Reject,
}

impl std::fmt::Display for MissingLikesPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingLikesPolicy::TreatAsZero => write!(f, "zero"),
            MissingLikesPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for MissingLikesPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "treat-as-zero" => Ok(MissingLikesPolicy::TreatAsZero),
            "reject" => Ok(MissingLikesPolicy::Reject),
            other => Err(format!(
                "unknown missing-likes policy '{other}' (expected 'zero' or 'reject')"
            )),
        }
    }
}

/// Parameters for one aggregation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightingConfig {
    pub coefficient: LikesCoefficient,
    pub missing_likes: MissingLikesPolicy,
}

impl WeightingConfig {
    #[must_use]
    pub fn new(coefficient: LikesCoefficient) -> Self {
        Self {
            coefficient,
            missing_likes: MissingLikesPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_missing_likes(mut self, policy: MissingLikesPolicy) -> Self {
        self.missing_likes = policy;
        self
    }
}

/// A classified comment: its sentiment distribution and popularity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredComment {
    pub distribution: SentimentDistribution,
    pub likes: Option<u64>,
}

/// The weighted mean distribution of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub distribution: SentimentDistribution,
    pub comment_count: usize,
    /// `Σ w_i`; at least `comment_count`.
    pub total_weight: f64,
}

/// Compute the weight of every comment in the batch, in input order.
///
/// # Errors
///
/// - [`AggregateError::EmptyBatch`] if `items` is empty.
/// - [`AggregateError::MissingLikes`] if a like count is absent under
///   [`MissingLikesPolicy::Reject`].
pub fn comment_weights(
    items: &[ScoredComment],
    config: &WeightingConfig,
) -> Result<Vec<f64>, AggregateError> {
    if items.is_empty() {
        return Err(AggregateError::EmptyBatch);
    }

    let mut likes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match (item.likes, config.missing_likes) {
            (Some(count), _) => likes.push(count),
            (None, MissingLikesPolicy::TreatAsZero) => likes.push(0),
            (None, MissingLikesPolicy::Reject) => {
                return Err(AggregateError::MissingLikes { index });
            }
        }
    }

    // An all-zero (or all-missing) batch falls back to L_max = 1; every
    // weight is then exactly 1.
    let max_likes = likes.iter().copied().max().unwrap_or(0).max(1);

    #[allow(clippy::cast_precision_loss)]
    let slope = config.coefficient.slope() / max_likes as f64;

    #[allow(clippy::cast_precision_loss)]
    let weights = likes
        .into_iter()
        .map(|count| 1.0 + slope * count as f64)
        .collect();

    Ok(weights)
}

/// Combine per-comment distributions into one likes-weighted distribution.
///
/// `result = Σ w_i · d_i / Σ w_i`. The result is independent of input order
/// up to floating-point rounding.
///
/// # Errors
///
/// - [`AggregateError::EmptyBatch`] if `items` is empty.
/// - [`AggregateError::DimensionMismatch`] if the distributions do not all
///   have the same number of labels.
/// - [`AggregateError::MissingLikes`] under [`MissingLikesPolicy::Reject`].
pub fn aggregate(
    items: &[ScoredComment],
    config: &WeightingConfig,
) -> Result<AggregateResult, AggregateError> {
    let first = items.first().ok_or(AggregateError::EmptyBatch)?;
    let dims = first.distribution.len();
    for (index, item) in items.iter().enumerate() {
        let found = item.distribution.len();
        if found != dims {
            return Err(AggregateError::DimensionMismatch {
                index,
                expected: dims,
                found,
            });
        }
    }

    let weights = comment_weights(items, config)?;

    let mut sums = vec![0.0_f64; dims];
    for (item, weight) in items.iter().zip(&weights) {
        for (acc, p) in sums.iter_mut().zip(item.distribution.as_slice()) {
            *acc += weight * p;
        }
    }
    let total_weight: f64 = weights.iter().sum();
    let values = sums.into_iter().map(|s| s / total_weight).collect();

    Ok(AggregateResult {
        // A convex combination of distributions is itself a distribution.
        distribution: SentimentDistribution::from_parts_unchecked(values),
        comment_count: items.len(),
        total_weight,
    })
}

//! Human-readable formatting for sentiment distributions.

use std::fmt::Write as _;

use crate::aggregate::AggregateResult;
use crate::types::{LabelSet, SentimentDistribution};

/// One `Label: 12.34%` line per label, in label order.
///
/// Labels beyond the distribution's length (or components beyond the
/// labels) are not printed.
#[must_use]
pub fn format_distribution(dist: &SentimentDistribution, labels: &[&str]) -> String {
    let mut out = String::new();
    for (label, p) in labels.iter().zip(dist.as_slice()) {
        let _ = writeln!(out, "{label}: {:.2}%", p * 100.0);
    }
    out
}

/// Verbose per-comment trace: the text followed by the raw per-label scores.
#[must_use]
pub fn format_trace(text: &str, dist: &SentimentDistribution, labels: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{text}");
    for (label, p) in labels.iter().zip(dist.as_slice()) {
        let _ = writeln!(out, "{label}: {p}");
    }
    out
}

/// The aggregate report printed at the end of an analysis.
#[must_use]
pub fn format_summary(result: &AggregateResult, label_set: LabelSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Comments analyzed: {}", result.comment_count);
    if let Some(label) = label_set.top_label(&result.distribution) {
        let _ = writeln!(out, "Overall sentiment: {label}");
    }
    if let Some(rating) = label_set.star_rating(&result.distribution) {
        let _ = writeln!(out, "Average rating: {rating:.2} / 5");
    }
    out.push_str(&format_distribution(
        &result.distribution,
        label_set.labels(),
    ));
    out
}

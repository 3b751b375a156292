//! Per-comment analysis export as JSON and CSV.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::SentimentError;
use crate::pipeline::CommentAnalysis;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Score of one label for one comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    pub label: &'static str,
    pub score: f64,
}

/// One exported comment row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedComment {
    pub text: String,
    pub likes: Option<u64>,
    pub words_amount: usize,
    pub unique_word_count: usize,
    pub char_count: usize,
    /// Arg-max label.
    pub sentiment: &'static str,
    pub weight: f64,
    pub scores: Vec<LabelScore>,
}

/// Where [`export_analysis`] wrote its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Build export rows for every classified comment, in analysis order.
#[must_use]
pub fn analyzed_records(analysis: &CommentAnalysis) -> Vec<AnalyzedComment> {
    let labels = analysis.label_set.labels();
    analysis
        .comments
        .iter()
        .map(|c| {
            let words: Vec<&str> = WORD_RE.find_iter(&c.text).map(|m| m.as_str()).collect();
            let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
            AnalyzedComment {
                text: c.text.clone(),
                likes: c.likes,
                words_amount: words.len(),
                unique_word_count: unique.len(),
                char_count: c.text.chars().count(),
                sentiment: analysis
                    .label_set
                    .top_label(&c.distribution)
                    .unwrap_or("Unknown"),
                weight: c.weight,
                scores: labels
                    .iter()
                    .zip(c.distribution.as_slice())
                    .map(|(&label, &score)| LabelScore { label, score })
                    .collect(),
            }
        })
        .collect()
}

/// Write the analysis to `<base>.json` and `<base>.csv`, creating parent
/// directories.
///
/// The CSV starts with a UTF-8 byte-order mark so spreadsheet tools detect
/// the encoding, and has one score column per label.
///
/// # Errors
///
/// Returns [`SentimentError::Io`] if a directory or file cannot be written,
/// or a serialization error from `serde_json` / `csv`.
pub fn export_analysis(
    base_path: &Path,
    analysis: &CommentAnalysis,
) -> Result<ExportPaths, SentimentError> {
    let records = analyzed_records(analysis);
    let json_path = base_path.with_extension("json");
    let csv_path = base_path.with_extension("csv");

    if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SentimentError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(&json_path, json).map_err(|e| SentimentError::Io {
        path: json_path.clone(),
        source: e,
    })?;

    write_csv(&csv_path, analysis.label_set.labels(), &records)?;

    tracing::info!(
        json = %json_path.display(),
        csv = %csv_path.display(),
        count = records.len(),
        "analysis exported"
    );
    Ok(ExportPaths {
        json: json_path,
        csv: csv_path,
    })
}

fn write_csv(
    path: &Path,
    labels: &[&str],
    records: &[AnalyzedComment],
) -> Result<(), SentimentError> {
    let io_err = |source: std::io::Error| SentimentError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = std::fs::File::create(path).map_err(io_err)?;
    file.write_all(UTF8_BOM).map_err(io_err)?;

    let mut writer = csv::Writer::from_writer(file);
    let mut header = vec![
        "text",
        "likes",
        "words_amount",
        "unique_word_count",
        "char_count",
        "sentiment",
        "weight",
    ];
    header.extend_from_slice(labels);
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.text.clone(),
            record.likes.map(|l| l.to_string()).unwrap_or_default(),
            record.words_amount.to_string(),
            record.unique_word_count.to_string(),
            record.char_count.to_string(),
            record.sentiment.to_string(),
            record.weight.to_string(),
        ];
        row.extend(record.scores.iter().map(|s| s.score.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush().map_err(io_err)?;
    Ok(())
}

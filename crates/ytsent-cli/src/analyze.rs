//! `analyze` command: classify, weight, and report a batch of comments.

use std::path::Path;

use chrono::Local;
use ytsent_comments::load_comments;
use ytsent_core::{
    format_summary, format_trace, AppConfig, LabelSet, LikesCoefficient, WeightingConfig,
};
use ytsent_sentiment::{analyze_comments, export_analysis, TeiClassifier};

use crate::fetch::fetch_video_comments;

/// Where the comments to analyze come from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CommentSource<'a> {
    File(&'a Path),
    Video(&'a str),
}

#[derive(Debug, Clone)]
pub(crate) struct AnalyzeOptions {
    pub max_results: Option<usize>,
    /// Overrides `YTSENT_LIKES_COEFFICIENT`.
    pub coefficient: Option<f64>,
    /// Overrides `YTSENT_LABEL_SET`.
    pub label_set: Option<LabelSet>,
    pub verbose: bool,
    pub export: bool,
}

/// TEI classifier for `label_set` using the configured server and batch size.
pub(crate) fn build_classifier(
    config: &AppConfig,
    label_set: LabelSet,
) -> anyhow::Result<TeiClassifier> {
    let classifier = TeiClassifier::new(
        &config.classifier_url,
        label_set,
        config.request_timeout_secs,
    )?
    .with_batch_size(config.classifier_batch_size);
    Ok(classifier)
}

/// Resolve the weighting for this run, validating a command-line coefficient
/// before any comment is fetched or classified.
fn weighting(
    configured: WeightingConfig,
    coefficient: Option<f64>,
) -> anyhow::Result<WeightingConfig> {
    match coefficient {
        Some(c) => Ok(WeightingConfig {
            coefficient: LikesCoefficient::new(c)?,
            ..configured
        }),
        None => Ok(configured),
    }
}

pub(crate) async fn run_analyze(
    config: &AppConfig,
    source: CommentSource<'_>,
    options: &AnalyzeOptions,
) -> anyhow::Result<()> {
    let weighting = weighting(config.weighting(), options.coefficient)?;
    let label_set = options.label_set.unwrap_or(config.label_set);
    let classifier = build_classifier(config, label_set)?;

    let comments = match source {
        CommentSource::File(path) => load_comments(path)?,
        CommentSource::Video(url) => {
            fetch_video_comments(config, url, options.max_results).await?
        }
    };
    tracing::info!(
        count = comments.len(),
        coefficient = weighting.coefficient.value(),
        %label_set,
        "analyzing comments"
    );

    let analysis = analyze_comments(&classifier, &comments, &weighting).await?;

    if options.verbose {
        for comment in &analysis.comments {
            println!(
                "{}",
                format_trace(&comment.text, &comment.distribution, label_set.labels())
            );
        }
    }
    print!("{}", format_summary(&analysis.aggregate, analysis.label_set));

    if options.export {
        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let base = config
            .analysis_dir()
            .join(format!("analyzed_comments_{stamp}"));
        let paths = export_analysis(&base, &analysis)?;
        println!(
            "Exported results to {} and {}",
            paths.json.display(),
            paths.csv.display()
        );
    }

    Ok(())
}

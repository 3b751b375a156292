//! `classify` command: score free text typed on stdin.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use ytsent_core::{format_distribution, AppConfig, LabelSet};
use ytsent_sentiment::classify_text;

use crate::analyze::build_classifier;

pub(crate) async fn run_classify(
    config: &AppConfig,
    label_set: Option<LabelSet>,
) -> anyhow::Result<()> {
    let label_set = label_set.unwrap_or(config.label_set);
    let classifier = build_classifier(config, label_set)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Enter text to classify ({label_set}); an empty line quits.");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if is_quit(&line) {
            break;
        }

        match classify_text(&classifier, &line).await {
            Ok(dist) => {
                print!("{}", format_distribution(&dist, label_set.labels()));
                if let Some(rating) = label_set.star_rating(&dist) {
                    println!("Rating: {rating:.2} / 5");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "classification failed");
                eprintln!("error: {e}");
            }
        }
    }

    Ok(())
}

/// Only a truly empty line ends the session; whitespace is still classified.
fn is_quit(line: &str) -> bool {
    line.trim_end_matches('\r').is_empty()
}

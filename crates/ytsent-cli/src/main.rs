mod analyze;
mod convert;
mod fetch;
mod interactive;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ytsent_core::{AppConfig, LabelSet};

use crate::analyze::{AnalyzeOptions, CommentSource};

#[derive(Debug, Parser)]
#[command(name = "ytsent")]
#[command(about = "Likes-weighted sentiment analysis of YouTube comments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch comments for a video and save them as a JSON comment file
    Fetch {
        /// Video URL (youtube.com/watch?v=... or youtu.be/...)
        #[arg(long)]
        url: String,
        /// Maximum number of comments to fetch (defaults to `YTSENT_MAX_COMMENTS`)
        #[arg(long)]
        max_results: Option<usize>,
        /// Output file (defaults to a timestamped file under the output directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Classify comments and print the likes-weighted sentiment
    Analyze {
        /// JSON comment file to analyze
        #[arg(long, required_unless_present = "url", conflicts_with = "url")]
        file: Option<PathBuf>,
        /// Video URL to fetch comments from
        #[arg(long)]
        url: Option<String>,
        /// Maximum number of comments to fetch when using --url
        #[arg(long)]
        max_results: Option<usize>,
        /// Likes coefficient in [0, 1); 0 ignores likes
        #[arg(long)]
        coefficient: Option<f64>,
        /// Classifier label set (three-class or five-star)
        #[arg(long)]
        label_set: Option<LabelSet>,
        /// Print every comment with its per-label scores
        #[arg(long, short)]
        verbose: bool,
        /// Write per-comment results as JSON and CSV
        #[arg(long)]
        export: bool,
    },
    /// Classify lines typed on stdin until an empty line or EOF
    Classify {
        /// Classifier label set (three-class or five-star)
        #[arg(long)]
        label_set: Option<LabelSet>,
    },
    /// Convert a semicolon-separated text file into a JSON comment file
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

/// Log filter used when no configuration is loaded and `RUST_LOG` is unset.
const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Fetch {
            url,
            max_results,
            output,
        }) => {
            let config = load_config()?;
            fetch::run_fetch(&config, &url, max_results, output.as_deref()).await?;
        }
        Some(Commands::Analyze {
            file,
            url,
            max_results,
            coefficient,
            label_set,
            verbose,
            export,
        }) => {
            let source = match (file.as_deref(), url.as_deref()) {
                (Some(path), _) => CommentSource::File(path),
                (None, Some(url)) => CommentSource::Video(url),
                (None, None) => anyhow::bail!("either --file or --url is required"),
            };
            let options = AnalyzeOptions {
                max_results,
                coefficient,
                label_set,
                verbose,
                export,
            };
            let config = load_config()?;
            analyze::run_analyze(&config, source, &options).await?;
        }
        Some(Commands::Classify { label_set }) => {
            let config = load_config()?;
            interactive::run_classify(&config, label_set).await?;
        }
        Some(Commands::Convert { input, output }) => {
            init_tracing(DEFAULT_LOG_LEVEL)?;
            convert::run_convert(&input, &output)?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

/// Load `.env` and the environment, then install the subscriber at the
/// configured level. Only commands that read configuration call this.
fn load_config() -> anyhow::Result<AppConfig> {
    let config = ytsent_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    Ok(config)
}

/// `RUST_LOG` wins over `fallback`. Logs go to stderr; reports use stdout.
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests;

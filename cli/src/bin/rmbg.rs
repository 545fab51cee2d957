use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use rmbg::{resolve_inputs, shuffle_inputs, Overrides};
use silhouette::{BatchPartitioner, Pipeline, RunConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// Remove the background of photographs using edge contours
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// List of image files
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,
    /// Edge detection thresholds (up to 2 numbers)
    #[arg(short, long, num_args = 1..=2, allow_negative_numbers = true)]
    thresholds: Vec<String>,
    /// Run configuration file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// Largest number of files a task processes without splitting
    #[arg(long)]
    split_threshold: Option<usize>,
    /// Process files in the given order instead of shuffling them
    #[arg(long)]
    no_shuffle: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    let overrides = Overrides {
        thresholds: cli.thresholds,
        threads: cli.threads,
        split_threshold: cli.split_threshold,
        no_shuffle: cli.no_shuffle,
    };
    let config = overrides.apply(config);

    let mut files = resolve_inputs(&cli.input)?;
    if config.shuffle {
        shuffle_inputs(&mut files);
    }

    let thresholds = config.thresholds();
    info!("Thresholds: low={} high={}", thresholds.low(), thresholds.high());

    let pipeline = Pipeline::builder().with_thresholds(thresholds).build();
    let report = BatchPartitioner::new(pipeline)
        .with_split_threshold(config.split_threshold)
        .with_threads(config.threads)
        .run(&files)?;

    info!(
        "✅ Done: {} written, {} skipped of {} files",
        report.written, report.skipped, report.processed
    );
    Ok(())
}

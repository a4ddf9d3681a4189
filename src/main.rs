use anyhow::{Context, Result};
use book_organizer::classifier::{Classifier, OpenAiClassifier};
use book_organizer::config::{find_config_file, get_config, load_config};
use book_organizer::pipeline;
use book_organizer::ui::{self, OutputFormat};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Organizer - Classify an eBook into a category folder using its metadata and an LLM
#[derive(Parser, Debug)]
#[command(name = "book-organizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify an eBook into a category folder using its metadata and an LLM", long_about = None)]
struct Cli {
    /// Path to the eBook file to classify (PDF, EPUB, or any other file)
    file: PathBuf,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(long, short)]
    quiet: bool,

    /// Output format for the classification result
    #[arg(long, short, value_enum, default_value_t = Output::Plain)]
    output: Output,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Completion model identifier (overrides the configuration)
    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    /// `field=value` text form
    Plain,
    /// JSON format (machine-readable)
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity; stdout is reserved for the report
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_organizer={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    } else {
        get_config().context("Failed to read configuration from the environment")?
    };

    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }
    tracing::debug!("Configuration: {:?}", config);

    let classifier = OpenAiClassifier::from_config(&config)?;
    tracing::info!("Using {} model {}", classifier.name(), classifier.model());

    let format = match cli.output {
        Output::Plain => OutputFormat::Plain,
        Output::Json => OutputFormat::Json,
    };
    pipeline::run(
        &cli.file,
        &classifier,
        &mut io::stdout(),
        format,
        ui::is_terminal(),
    )
    .await?;

    Ok(())
}

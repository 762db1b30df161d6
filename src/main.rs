//! CLI entry point for the diet analyzer tool.
//!
//! Provides subcommands for analyzing the nutrition dataset and for
//! uploading the raw source file to S3-compatible blob storage.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use diet_analyzer::analyzers::analyzer;
use diet_analyzer::analyzers::writetos3::upload_file;
use diet_analyzer::charts;
use diet_analyzer::error::AnalysisError;
use diet_analyzer::fetch::{BasicClient, fetch_bytes};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_CSV_PATH: &str = "data/All_Diets.csv";

#[derive(Parser)]
#[command(name = "diet_analyzer")]
#[command(about = "Descriptive statistics and charts for the All_Diets dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the dataset and write result CSVs and charts
    Analyze {
        /// Dataset file path or URL; falls back to $CSV_PATH, then data/All_Diets.csv
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Directory to write results/ and charts/ into
        #[arg(short, long, default_value = "outputs")]
        output_dir: String,

        /// Skip chart rendering
        #[arg(long, default_value_t = false)]
        skip_charts: bool,
    },
    /// Upload the raw dataset file to an S3 bucket
    Upload {
        /// File to upload; falls back to $CSV_PATH, then data/All_Diets.csv
        #[arg(value_name = "FILE")]
        source: Option<String>,

        /// S3 bucket name to upload to (e.g., "datasets")
        #[arg(long)]
        s3_bucket: String,

        /// Object key; defaults to the source file name
        #[arg(long)]
        key: Option<String>,

        /// Gzip compress the file before uploading
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/diet_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("diet_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            output_dir,
            skip_charts,
        } => {
            let source = resolve_source(source);
            let out_dir = Path::new(&output_dir);
            let results_dir = out_dir.join("results");

            info!(source = %source, output_dir = %output_dir, "Starting analysis");

            let analysis = if source.starts_with("http") {
                let bytes = fetch_dataset(&source).await?;
                analyzer::run_from_bytes(&bytes, &results_dir)?
            } else {
                analyzer::run(Path::new(&source), &results_dir)?
            };

            if !skip_charts {
                charts::render_all(
                    &out_dir.join("charts"),
                    &analysis.averages,
                    &analysis.top_recipes,
                )?;
            }

            println!("{}", serde_json::to_string_pretty(&analysis.summary)?);
        }
        Commands::Upload {
            source,
            s3_bucket,
            key,
            gzip,
        } => {
            let source = resolve_source(source);
            let path = Path::new(&source);
            if !path.exists() {
                return Err(AnalysisError::NotFound(path.to_path_buf()).into());
            }

            let key = key.unwrap_or_else(|| {
                path.file_name()
                    .and_then(OsStr::to_str)
                    .unwrap_or("dataset.csv")
                    .to_string()
            });

            info!(source = %source, bucket = %s3_bucket, gzip, "Starting upload");

            let config = aws_config::load_from_env().await;
            let client = aws_sdk_s3::Client::new(&config);
            upload_file(&client, &s3_bucket, &key, path, gzip).await?;
        }
    }

    Ok(())
}

/// CLI argument wins, then the CSV_PATH env var, then the conventional
/// location next to the binary.
fn resolve_source(arg: Option<String>) -> String {
    arg.or_else(|| std::env::var("CSV_PATH").ok())
        .unwrap_or_else(|| DEFAULT_CSV_PATH.to_string())
}

/// Fetches dataset bytes over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetch_dataset(url: &str) -> Result<Vec<u8>> {
    let client = BasicClient::new();
    fetch_bytes(&client, url).await
}

//! classify-file: send one file to a local LLM server and print its classification
//!
//! Usage:
//!   classify-file document.txt
//!   classify-file invoice.pdf --server http://localhost:8000
//!   classify-file photo.jpg --supports-vision --pretty
//!
//! stdout always carries one JSON object; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use llm_classify::{
    classify_file, ClassificationOutcome, ClassificationTarget, ClassifierConfig, ErrorResult,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "Examples:
  classify-file document.txt
  classify-file invoice.pdf --server http://localhost:8000
  classify-file photo.jpg --supports-vision

Environment:
  CLASSIFY_SERVER_URL, CLASSIFY_MODEL, CLASSIFY_MAX_TEXT_LENGTH,
  CLASSIFY_SUPPORTS_VISION, CLASSIFY_TIMEOUT_SECS, CLASSIFY_API_KEY, RUST_LOG";

#[derive(Parser, Debug)]
#[command(name = "classify-file", version)]
#[command(about = "Classify a file using a local OpenAI-compatible LLM server")]
#[command(after_help = EXAMPLES)]
struct Args {
    /// Path to file to classify
    file: PathBuf,

    /// Server URL [default: http://localhost:8000]
    #[arg(long)]
    server: Option<String>,

    /// Model name [default: local-model]
    #[arg(long)]
    model: Option<String>,

    /// Maximum text length to send [default: 4096]
    #[arg(long)]
    max_text_length: Option<usize>,

    /// Enable vision support for image files
    #[arg(long)]
    supports_vision: bool,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Request timeout in seconds [default: 120]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Bearer token for servers that require one
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let outcome = match run(&args) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{:#}", e);
            ErrorResult::new(format!("{:#}", e)).into()
        }
    };

    match outcome.to_json(args.pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize result");
            return ExitCode::FAILURE;
        }
    }

    if outcome.is_classified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(args: &Args) -> anyhow::Result<ClassificationOutcome> {
    let config = resolve_config(args).context("invalid configuration")?;
    let target = ClassificationTarget::new(&args.file);
    Ok(classify_file(&target, &config)?)
}

fn resolve_config(args: &Args) -> llm_classify::Result<ClassifierConfig> {
    let mut config = ClassifierConfig::from_env()?;
    if let Some(server) = &args.server {
        config = config.with_server_url(server);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(max) = args.max_text_length {
        config = config.with_max_text_length(max);
    }
    if args.supports_vision {
        config = config.with_supports_vision(true);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(key) = &args.api_key {
        config = config.with_api_key(key);
    }
    Ok(config)
}

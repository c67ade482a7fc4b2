//! llm-server: start a local OpenAI-compatible inference server
//!
//! Usage:
//!   llm-server                              llama-cpp backend, settings from env
//!   llm-server --backend mlx --port 8081
//!   llm-server --model /models/phi-3.gguf
//!
//! Settings resolve as: flag > env var > backend default.

use anyhow::Context;
use clap::Parser;
use llm_classify::launcher::{
    backend_for, resolve_backend, resolve_from_env, BackendKind, LaunchOverrides,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const ENVIRONMENT: &str = "Environment:
  LLM_SERVER_BACKEND        llama-cpp (default) or mlx
  LLM_SERVER_PYTHON         Python interpreter (default: python3)
  llama-cpp: SERVER_{MODEL,HOST,PORT,LOG_LEVEL}, falling back to OLLAMA_*
             (defaults: model.gguf, 127.0.0.1, 8000, info)
  mlx:       MLX_SERVER_{MODEL,HOST,PORT,LOG_LEVEL}, falling back to SERVER_*
             (defaults: mlx-community/Phi-3.5-mini-instruct-4bit, 127.0.0.1, 8080, info)";

#[derive(Parser, Debug)]
#[command(name = "llm-server", version)]
#[command(about = "Start a local OpenAI-compatible inference server")]
#[command(after_help = ENVIRONMENT)]
struct Args {
    /// Server backend (llama-cpp or mlx)
    #[arg(long)]
    backend: Option<BackendKind>,

    /// Model path or repository id
    #[arg(long)]
    model: Option<String>,

    /// Host to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Server log level
    #[arg(long)]
    log_level: Option<String>,

    /// Python interpreter used to run the backend module
    #[arg(long)]
    python: Option<PathBuf>,

    /// Seconds to wait for the server to answer /v1/models
    #[arg(long, default_value_t = 300)]
    ready_timeout_secs: u64,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let backend = resolve_backend(args.backend, |key| std::env::var(key).ok())?;
    let overrides = LaunchOverrides {
        model: args.model,
        host: args.host,
        port: args.port,
        log_level: args.log_level,
        python: args.python,
    };
    let config = resolve_from_env(backend, overrides).context("invalid launch configuration")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.backend,
        model = %config.model,
        url = %config.base_url(),
        "launching"
    );

    let mut server = backend_for(config.backend).start(&config)?;
    if let Err(e) = server.wait_ready(
        Duration::from_secs(args.ready_timeout_secs),
        Duration::from_millis(500),
    ) {
        let _ = server.shutdown();
        return Err(e).context("server failed to start");
    }

    let status = server.wait()?;
    tracing::info!(%status, "server exited");
    Ok(match status.code() {
        Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    })
}

use crate::{Error, ErrorContext, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_BACKEND: &str = "LLM_SERVER_BACKEND";
pub const ENV_PYTHON: &str = "LLM_SERVER_PYTHON";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Supported inference server backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// `llama_cpp.server` (llama-cpp-python), serving GGUF models.
    LlamaCpp,
    /// `mlx_lm.server` on Apple silicon.
    Mlx,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LlamaCpp => "llama-cpp",
            Self::Mlx => "mlx",
        }
    }

    /// Env var prefixes, highest priority first.
    pub fn env_prefixes(&self) -> &'static [&'static str] {
        match self {
            Self::LlamaCpp => &["SERVER", "OLLAMA"],
            Self::Mlx => &["MLX_SERVER", "SERVER"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::LlamaCpp => "model.gguf",
            Self::Mlx => "mlx-community/Phi-3.5-mini-instruct-4bit",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::LlamaCpp => 8000,
            Self::Mlx => 8080,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llama-cpp" | "llama_cpp" | "llamacpp" | "llama" | "ollama" => Ok(Self::LlamaCpp),
            "mlx" | "mlx-lm" | "mlx_lm" => Ok(Self::Mlx),
            other => Err(format!("Unknown backend: {} (expected llama-cpp or mlx)", other)),
        }
    }
}

/// Fully resolved launch settings for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub backend: BackendKind,
    pub model: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub python: PathBuf,
}

impl LaunchConfig {
    /// Base URL clients should use, e.g. `http://127.0.0.1:8000`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Explicit call-site values; `None` falls through to env, then defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOverrides {
    pub model: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub python: Option<PathBuf>,
}

/// Pick the backend: explicit value, then `LLM_SERVER_BACKEND`, then llama-cpp.
pub fn resolve_backend<F>(explicit: Option<BackendKind>, lookup: F) -> Result<BackendKind>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(kind) = explicit {
        return Ok(kind);
    }
    match lookup(ENV_BACKEND).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.parse().map_err(|e: String| {
            Error::configuration_with_context(
                e,
                ErrorContext::new()
                    .with_field_path(ENV_BACKEND)
                    .with_source("launcher"),
            )
        }),
        None => Ok(BackendKind::LlamaCpp),
    }
}

/// Resolve a [`LaunchConfig`] for any backend.
///
/// Each field takes the explicit override if set, else the first non-empty
/// `{PREFIX}_{FIELD}` env var in [`BackendKind::env_prefixes`] order, else the
/// backend default.
pub fn resolve<F>(backend: BackendKind, overrides: LaunchOverrides, lookup: F) -> Result<LaunchConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |field: &str| -> Option<(String, String)> {
        backend.env_prefixes().iter().find_map(|prefix| {
            let key = format!("{}_{}", prefix, field);
            lookup(&key)
                .filter(|v| !v.trim().is_empty())
                .map(|v| (key, v))
        })
    };

    let model = overrides
        .model
        .or_else(|| env("MODEL").map(|(_, v)| v))
        .unwrap_or_else(|| backend.default_model().to_string());
    let host = overrides
        .host
        .or_else(|| env("HOST").map(|(_, v)| v))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match overrides.port {
        Some(port) => port,
        None => match env("PORT") {
            Some((key, raw)) => parse_port(&key, &raw)?,
            None => backend.default_port(),
        },
    };
    let log_level = overrides
        .log_level
        .or_else(|| env("LOG_LEVEL").map(|(_, v)| v))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let python = overrides
        .python
        .or_else(|| lookup(ENV_PYTHON).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON));

    Ok(LaunchConfig {
        backend,
        model,
        host,
        port,
        log_level,
        python,
    })
}

/// [`resolve`] against the process environment.
pub fn resolve_from_env(backend: BackendKind, overrides: LaunchOverrides) -> Result<LaunchConfig> {
    resolve(backend, overrides, |key| std::env::var(key).ok())
}

fn parse_port(key: &str, raw: &str) -> Result<u16> {
    let port: u16 = crate::config::parse_env(key, raw)?;
    if port == 0 {
        return Err(Error::configuration_with_context(
            format!("invalid value for {}", key),
            ErrorContext::new()
                .with_field_path(key)
                .with_details("port must be between 1 and 65535")
                .with_source("launcher"),
        ));
    }
    Ok(port)
}

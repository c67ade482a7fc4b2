//! Inference server launcher.
//!
//! Every backend shares one configuration resolver ([`resolve`]) and sits
//! behind the [`ServerBackend`] capability, whose `start` returns a
//! [`ServerHandle`] owning the child process. The servers themselves
//! (`llama_cpp.server`, `mlx_lm.server`) are external programs.
//!
//! ```no_run
//! use llm_classify::launcher::{backend_for, resolve_from_env, BackendKind, LaunchOverrides};
//! use std::time::Duration;
//!
//! # fn main() -> llm_classify::Result<()> {
//! let config = resolve_from_env(BackendKind::LlamaCpp, LaunchOverrides::default())?;
//! let mut server = backend_for(config.backend).start(&config)?;
//! server.wait_ready(Duration::from_secs(300), Duration::from_millis(500))?;
//! println!("serving at {}", server.base_url());
//! server.shutdown()?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod config;
mod handle;

pub use backend::{backend_for, LlamaCppServer, MlxServer, ServerBackend};
pub use config::{
    resolve, resolve_backend, resolve_from_env, BackendKind, LaunchConfig, LaunchOverrides,
    DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PYTHON, ENV_BACKEND, ENV_PYTHON,
};
pub use handle::ServerHandle;

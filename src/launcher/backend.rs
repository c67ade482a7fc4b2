use super::config::{BackendKind, LaunchConfig};
use super::handle::ServerHandle;
use crate::{Error, ErrorContext, Result};
use std::process::{Command, Stdio};

/// Something that can start an OpenAI-compatible inference server.
pub trait ServerBackend {
    fn kind(&self) -> BackendKind;

    /// Command line that runs the server for `config`.
    fn command(&self, config: &LaunchConfig) -> Command;

    fn start(&self, config: &LaunchConfig) -> Result<ServerHandle> {
        let mut cmd = self.command(config);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        tracing::info!(
            backend = %self.kind(),
            program = %cmd.get_program().to_string_lossy(),
            args = ?args,
            "starting inference server"
        );

        let child = cmd.spawn().map_err(|e| {
            Error::launch_with_context(
                format!("failed to spawn {} server", self.kind()),
                ErrorContext::new()
                    .with_field_path("python")
                    .with_details(format!("{}: {}", config.python.display(), e))
                    .with_source("launcher"),
            )
        })?;

        Ok(ServerHandle::attach(child, self.kind(), config.base_url()))
    }
}

/// `python -m llama_cpp.server`
#[derive(Debug, Clone, Copy, Default)]
pub struct LlamaCppServer;

impl ServerBackend for LlamaCppServer {
    fn kind(&self) -> BackendKind {
        BackendKind::LlamaCpp
    }

    fn command(&self, config: &LaunchConfig) -> Command {
        let port = config.port.to_string();
        let mut cmd = Command::new(&config.python);
        cmd.args(["-m", "llama_cpp.server"])
            .args(["--model", config.model.as_str()])
            .args(["--host", config.host.as_str()])
            .args(["--port", port.as_str()]);
        if config.log_level.eq_ignore_ascii_case("debug") {
            cmd.args(["--verbose", "true"]);
        }
        cmd
    }
}

/// `python -m mlx_lm.server`
#[derive(Debug, Clone, Copy, Default)]
pub struct MlxServer;

impl ServerBackend for MlxServer {
    fn kind(&self) -> BackendKind {
        BackendKind::Mlx
    }

    fn command(&self, config: &LaunchConfig) -> Command {
        let port = config.port.to_string();
        let log_level = config.log_level.to_ascii_uppercase();
        let mut cmd = Command::new(&config.python);
        cmd.args(["-m", "mlx_lm.server"])
            .args(["--model", config.model.as_str()])
            .args(["--host", config.host.as_str()])
            .args(["--port", port.as_str()])
            .args(["--log-level", log_level.as_str()]);
        cmd
    }
}

pub fn backend_for(kind: BackendKind) -> Box<dyn ServerBackend> {
    match kind {
        BackendKind::LlamaCpp => Box::new(LlamaCppServer),
        BackendKind::Mlx => Box::new(MlxServer),
    }
}

use super::config::BackendKind;
use crate::{Error, ErrorContext, Result};
use std::process::{Child, ExitStatus};
use std::time::{Duration, Instant};

const MODELS_PATH: &str = "/v1/models";
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Running inference server process.
///
/// The child is killed when the handle is dropped without [`ServerHandle::wait`]
/// or [`ServerHandle::shutdown`] having reaped it.
pub struct ServerHandle {
    child: Option<Child>,
    backend: BackendKind,
    base_url: String,
}

impl ServerHandle {
    /// Take ownership of an already-spawned server process.
    pub fn attach(child: Child, backend: BackendKind, base_url: impl Into<String>) -> Self {
        Self {
            child: Some(child),
            backend,
            base_url: base_url.into(),
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Poll `GET /v1/models` until it answers 2xx.
    ///
    /// Fails if the process exits first or `timeout` elapses.
    pub fn wait_ready(&mut self, timeout: Duration, poll_interval: Duration) -> Result<()> {
        let probe = reqwest::blocking::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| Error::Transport(crate::transport::TransportError::Other(e.to_string())))?;
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), MODELS_PATH);
        let started = Instant::now();

        loop {
            if let Some(status) = self.try_status()? {
                return Err(Error::launch_with_context(
                    format!("{} server exited before becoming ready", self.backend),
                    ErrorContext::new()
                        .with_details(format!("exit status: {}", status))
                        .with_source("launcher"),
                ));
            }

            match probe.get(&url).send() {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(
                        backend = %self.backend,
                        url = %self.base_url,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "inference server ready"
                    );
                    return Ok(());
                }
                Ok(resp) => tracing::debug!(status = resp.status().as_u16(), "server not ready yet"),
                Err(e) => tracing::debug!(error = %e, "server not reachable yet"),
            }

            if started.elapsed() >= timeout {
                return Err(Error::launch_with_context(
                    format!("{} server did not become ready", self.backend),
                    ErrorContext::new()
                        .with_field_path(url)
                        .with_details(format!("timed out after {}s", timeout.as_secs()))
                        .with_source("launcher"),
                ));
            }
            std::thread::sleep(poll_interval);
        }
    }

    /// Block until the server exits.
    pub fn wait(mut self) -> Result<ExitStatus> {
        match self.child.take() {
            Some(mut child) => Ok(child.wait()?),
            None => Err(already_reaped()),
        }
    }

    /// Kill the server and reap it.
    pub fn shutdown(mut self) -> Result<ExitStatus> {
        match self.child.take() {
            Some(mut child) => {
                if child.try_wait()?.is_none() {
                    child.kill()?;
                }
                let status = child.wait()?;
                tracing::info!(backend = %self.backend, %status, "inference server stopped");
                Ok(status)
            }
            None => Err(already_reaped()),
        }
    }

    fn try_status(&mut self) -> Result<Option<ExitStatus>> {
        match self.child.as_mut() {
            Some(child) => Ok(child.try_wait()?),
            None => Err(already_reaped()),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                tracing::debug!(pid = child.id(), "killing inference server on drop");
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

fn already_reaped() -> Error {
    Error::launch_with_context(
        "server process already reaped",
        ErrorContext::new().with_source("launcher"),
    )
}

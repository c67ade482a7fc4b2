use crate::config::ClassifierConfig;
use crate::types::ChatRequest;
use crate::{Error, ErrorContext, Result};
use std::time::Duration;
use url::Url;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Successful (2xx) response from the inference server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let base = Url::parse(&config.server_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid server URL",
                ErrorContext::new()
                    .with_field_path("server_url")
                    .with_details(format!("'{}': {}", config.server_url, e))
                    .with_source("transport"),
            )
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "server URL must use http or https",
                ErrorContext::new()
                    .with_field_path("server_url")
                    .with_details(config.server_url.clone())
                    .with_source("transport"),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            timeout: config.timeout,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one chat request. No retries: a failing server should be visible.
    pub fn send(&self, request: &ChatRequest) -> std::result::Result<RawResponse, TransportError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(endpoint = %self.endpoint, %request_id, model = %request.model, "sending chat request");

        let mut req = self
            .client
            .post(&self.endpoint)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().map_err(|e| self.classify_error(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.classify_error(e))?;

        if !status.is_success() {
            tracing::warn!(%request_id, status = status.as_u16(), "inference server returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(%request_id, status = status.as_u16(), bytes = body.len(), "received chat response");
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }

    fn classify_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            TransportError::Http(e)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Other(String),
}

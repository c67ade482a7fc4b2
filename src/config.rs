//! Classifier configuration.
//!
//! One explicit struct carries everything a classification run needs. Values
//! resolve with a single precedence rule: explicit call-site value, then
//! environment variable, then built-in default.

use crate::{Error, ErrorContext, Result};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_MODEL: &str = "local-model";
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 4096;
pub const DEFAULT_BINARY_PREFIX_BYTES: usize = 4096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_SERVER_URL: &str = "CLASSIFY_SERVER_URL";
pub const ENV_MODEL: &str = "CLASSIFY_MODEL";
pub const ENV_MAX_TEXT_LENGTH: &str = "CLASSIFY_MAX_TEXT_LENGTH";
pub const ENV_SUPPORTS_VISION: &str = "CLASSIFY_SUPPORTS_VISION";
pub const ENV_TIMEOUT_SECS: &str = "CLASSIFY_TIMEOUT_SECS";
pub const ENV_API_KEY: &str = "CLASSIFY_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Base URL of the inference server, without the `/v1/...` path.
    pub server_url: String,
    pub model: String,
    /// Maximum number of characters of file text sent to the model.
    pub max_text_length: usize,
    /// Number of leading bytes decoded from files that are not valid UTF-8.
    pub binary_prefix_bytes: usize,
    pub supports_vision: bool,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            binary_prefix_bytes: DEFAULT_BINARY_PREFIX_BYTES,
            supports_vision: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
        }
    }
}

impl ClassifierConfig {
    /// Resolve from the process environment over built-in defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup over built-in defaults.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_SERVER_URL) {
            config.server_url = url;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        if let Some(raw) = get(ENV_MAX_TEXT_LENGTH) {
            config.max_text_length = parse_env(ENV_MAX_TEXT_LENGTH, &raw)?;
        }
        if let Some(raw) = get(ENV_SUPPORTS_VISION) {
            config.supports_vision = parse_flag(ENV_SUPPORTS_VISION, &raw)?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_env(ENV_TIMEOUT_SECS, &raw)?);
        }
        config.api_key = get(ENV_API_KEY);

        Ok(config)
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_text_length(mut self, max: usize) -> Self {
        self.max_text_length = max;
        self
    }

    pub fn with_supports_vision(mut self, enabled: bool) -> Self {
        self.supports_vision = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Full chat-completions endpoint derived from `server_url`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.server_url.trim_end_matches('/'),
            crate::transport::CHAT_COMPLETIONS_PATH
        )
    }
}

pub(crate) fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        Error::configuration_with_context(
            format!("invalid value for {}", key),
            ErrorContext::new()
                .with_field_path(key)
                .with_details(format!("'{}': {}", raw, e))
                .with_source("config"),
        )
    })
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration_with_context(
            format!("invalid boolean for {}", key),
            ErrorContext::new()
                .with_field_path(key)
                .with_details(format!("'{}' is not one of true/false/1/0/yes/no/on/off", other))
                .with_source("config"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = ClassifierConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.max_text_length, 4096);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(!config.supports_vision);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ClassifierConfig::from_lookup(lookup(&[
            (ENV_SERVER_URL, "http://10.0.0.2:9000"),
            (ENV_MODEL, "qwen2-vl"),
            (ENV_MAX_TEXT_LENGTH, "1024"),
            (ENV_SUPPORTS_VISION, "yes"),
            (ENV_TIMEOUT_SECS, "30"),
            (ENV_API_KEY, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.server_url, "http://10.0.0.2:9000");
        assert_eq!(config.model, "qwen2-vl");
        assert_eq!(config.max_text_length, 1024);
        assert!(config.supports_vision);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn explicit_values_override_env() {
        let config = ClassifierConfig::from_lookup(lookup(&[(ENV_MODEL, "from-env")]))
            .unwrap()
            .with_model("from-cli");
        assert_eq!(config.model, "from-cli");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = ClassifierConfig::from_lookup(lookup(&[(ENV_MODEL, "  ")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn invalid_number_reports_field() {
        let err = ClassifierConfig::from_lookup(lookup(&[(ENV_MAX_TEXT_LENGTH, "lots")]))
            .unwrap_err();
        let ctx = err.context().expect("configuration error carries context");
        assert_eq!(ctx.field_path.as_deref(), Some(ENV_MAX_TEXT_LENGTH));
    }

    #[test]
    fn invalid_flag_is_rejected() {
        assert!(ClassifierConfig::from_lookup(lookup(&[(ENV_SUPPORTS_VISION, "maybe")])).is_err());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClassifierConfig::default().with_server_url("http://localhost:8000/");
        assert_eq!(config.endpoint(), "http://localhost:8000/v1/chat/completions");
    }
}

//! Classification pipeline: Loader → Prompt → Request → Transport → Interpreter.

use crate::config::ClassifierConfig;
use crate::content::{ContentLoader, ExtractedContent};
use crate::prompt::build_prompt;
use crate::structured::{interpret, ClassificationOutcome, ErrorResult};
use crate::transport::HttpTransport;
use crate::types::{compose, ChatRequest};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// File to classify plus the name shown to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTarget {
    file_path: PathBuf,
    display_name: String,
}

impl ClassificationTarget {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let display_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string_lossy().into_owned());
        Self {
            file_path,
            display_name,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Reusable classifier bound to one configuration and HTTP client.
pub struct Classifier {
    config: ClassifierConfig,
    loader: ContentLoader,
    transport: HttpTransport,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            loader: ContentLoader::from_config(&config),
            config,
            transport,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Load the target and build the request without sending it.
    ///
    /// Fails only when the file is missing or unreadable.
    pub fn prepare(&self, target: &ClassificationTarget) -> Result<(ExtractedContent, ChatRequest)> {
        let content = self.loader.load(target.file_path())?;

        if content.is_image() && !self.config.supports_vision {
            tracing::warn!(
                file = %target.display_name(),
                "image file detected but vision support is disabled; classification may not work properly"
            );
        }

        let prompt = build_prompt(target.display_name(), &content, self.config.max_text_length);
        let request = compose(&self.config.model, &prompt, &content, self.config.supports_vision);
        tracing::debug!(
            prompt_chars = prompt.chars().count(),
            multimodal = request.contains_image(),
            "composed chat request"
        );
        Ok((content, request))
    }

    /// Classify one file.
    ///
    /// `Err` is reserved for a missing or unreadable input file, detected
    /// before any network call. Transport and parse failures come back as
    /// [`ClassificationOutcome::Failed`].
    pub fn classify(&self, target: &ClassificationTarget) -> Result<ClassificationOutcome> {
        let (content, request) = self.prepare(target)?;

        tracing::info!(
            file = %target.display_name(),
            kind = %content.kind(),
            mime = %content.mime_type(),
            "classifying file"
        );

        match self.transport.send(&request) {
            Ok(raw) => Ok(interpret(&raw.body)),
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                Ok(ErrorResult::request_failed(&e).into())
            }
        }
    }
}

/// Classify one file with a one-off [`Classifier`].
pub fn classify_file(target: &ClassificationTarget, config: &ClassifierConfig) -> Result<ClassificationOutcome> {
    if !target.file_path().exists() {
        return Err(Error::not_found(target.file_path()));
    }
    Classifier::new(config.clone())?.classify(target)
}

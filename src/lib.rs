//! # llm-classify
//!
//! File classification client for local OpenAI-compatible LLM servers, plus a
//! launcher for the servers themselves.
//!
//! ## Overview
//!
//! A classification run is a straight pipeline:
//!
//! 1. [`content`] loads the file as text or a base64 image.
//! 2. [`prompt`] renders the file-organizer instructions.
//! 3. [`types`] composes the chat-completions request.
//! 4. [`transport`] posts it to `{server}/v1/chat/completions`.
//! 5. [`structured`] interprets the answer, tolerating fenced or broken JSON.
//!
//! Only a missing input file is an error. Transport and parse failures come
//! back as [`ErrorResult`] values, so callers always have JSON to emit.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_classify::{classify_file, ClassificationTarget, ClassifierConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ClassifierConfig::from_env()?.with_model("qwen2.5-3b-instruct");
//!     let outcome = classify_file(&ClassificationTarget::new("invoice.txt"), &config)?;
//!     println!("{}", outcome.to_json(true)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Classifier configuration (explicit > env > default) |
//! | [`content`] | Content loading and MIME sniffing |
//! | [`prompt`] | Classification prompt rendering |
//! | [`types`] | Chat request and message types |
//! | [`transport`] | Blocking HTTP transport |
//! | [`structured`] | Response interpretation |
//! | [`classify`] | The end-to-end pipeline |
//! | [`launcher`] | Inference server launcher |

pub mod classify;
pub mod config;
pub mod content;
pub mod launcher;
pub mod prompt;
pub mod structured;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use classify::{classify_file, ClassificationTarget, Classifier};
pub use config::ClassifierConfig;
pub use content::{ContentKind, ExtractedContent};
pub use structured::{Classification, ClassificationOutcome, ErrorResult};
pub use types::ChatRequest;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

//! Wire types for the OpenAI-compatible chat-completions endpoint.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and content |
//! | [`MessageContent`] | Plain string or a list of multimodal parts |
//! | [`ContentPart`] | `text` or `image_url` part |
//! | [`ChatRequest`] | Request body sent to `/v1/chat/completions` |
//!
//! ## Example
//!
//! ```rust
//! use llm_classify::content::ExtractedContent;
//! use llm_classify::types::compose;
//!
//! let content = ExtractedContent::text("hello", "text/plain");
//! let request = compose("local-model", "Classify this", &content, false);
//! assert_eq!(request.messages.len(), 2);
//! assert!(!request.stream);
//! ```

pub mod message;
pub mod request;

pub use message::{ContentPart, ImageUrl, Message, MessageContent, MessageRole};
pub use request::{compose, ChatRequest, SYSTEM_MESSAGE};

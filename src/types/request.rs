use super::message::{ContentPart, Message};
use crate::content::ExtractedContent;
use serde::{Deserialize, Serialize};

/// System turn sent with every classification request.
pub const SYSTEM_MESSAGE: &str =
    "Return only valid JSON (no markdown), with keys: category_path, suggested_filename, confidence (0-1).";

pub const TEMPERATURE: f32 = 0.2;
pub const MAX_TOKENS: u32 = 512;

/// Body of a `POST /v1/chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl ChatRequest {
    pub fn contains_image(&self) -> bool {
        self.messages.iter().any(Message::contains_image)
    }
}

/// Assemble the chat request for one classification.
///
/// Image content is attached as an `image_url` part ahead of the prompt only
/// when `supports_vision` is set; otherwise the user turn is the prompt alone.
pub fn compose(
    model: &str,
    prompt: &str,
    content: &ExtractedContent,
    supports_vision: bool,
) -> ChatRequest {
    let user = match content.data_uri() {
        Some(uri) if supports_vision => {
            Message::user_parts(vec![ContentPart::image_url(uri), ContentPart::text(prompt)])
        }
        _ => Message::user(prompt),
    };

    ChatRequest {
        model: model.to_string(),
        messages: vec![Message::system(SYSTEM_MESSAGE), user],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        stream: false,
    }
}

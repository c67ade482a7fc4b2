//! Content loading: turns a file on disk into text or an image payload.

mod loader;

pub use loader::{guess_mime, load, ContentLoader};

use serde::Serialize;

/// What kind of payload was extracted from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Image,
    /// Nothing usable could be decoded.
    Binary,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Binary => "binary",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload extracted from a classification target.
///
/// `Text` carries text only, `Image` carries base64 bytes only, `Binary`
/// carries neither. The constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    kind: ContentKind,
    text: Option<String>,
    image_base64: Option<String>,
    mime_type: String,
    truncated: bool,
}

impl ExtractedContent {
    pub fn text(text: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: Some(text.into()),
            image_base64: None,
            mime_type: mime_type.into(),
            truncated: false,
        }
    }

    pub fn image(image_base64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Image,
            text: None,
            image_base64: Some(image_base64.into()),
            mime_type: mime_type.into(),
            truncated: false,
        }
    }

    pub fn binary() -> Self {
        Self {
            kind: ContentKind::Binary,
            text: None,
            image_base64: None,
            mime_type: loader::OCTET_STREAM.to_string(),
            truncated: false,
        }
    }

    /// Mark text that was cut to fit the length limit.
    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn is_image(&self) -> bool {
        self.kind == ContentKind::Image
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image_base64(&self) -> Option<&str> {
        self.image_base64.as_deref()
    }

    /// Whether the source text was longer than what this content carries.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// `data:` URI for image content, as used in `image_url` request parts.
    pub fn data_uri(&self) -> Option<String> {
        self.image_base64
            .as_ref()
            .map(|data| format!("data:{};base64,{}", self.mime_type, data))
    }
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

use super::{truncate_chars, ExtractedContent};
use crate::config::{ClassifierConfig, DEFAULT_BINARY_PREFIX_BYTES, DEFAULT_MAX_TEXT_LENGTH};
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
const DEFAULT_TEXT_MIME: &str = "text/plain";

/// Loads classification targets from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLoader {
    max_text_length: usize,
    binary_prefix_bytes: usize,
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            binary_prefix_bytes: DEFAULT_BINARY_PREFIX_BYTES,
        }
    }
}

impl ContentLoader {
    pub fn new(max_text_length: usize, binary_prefix_bytes: usize) -> Self {
        Self {
            max_text_length,
            binary_prefix_bytes,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.max_text_length, config.binary_prefix_bytes)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<ExtractedContent> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::not_found(path));
        }

        let mime = guess_mime(path);
        if mime.as_deref().is_some_and(|m| m.starts_with("image/")) {
            let bytes = std::fs::read(path)?;
            let data = base64::engine::general_purpose::STANDARD.encode(bytes);
            let mime = mime
                .filter(|m| m.len() > "image/".len())
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
            tracing::debug!(path = %path.display(), mime = %mime, "loaded image content");
            return Ok(ExtractedContent::image(data, mime));
        }

        let bytes = std::fs::read(path)?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let kept = truncate_chars(&text, self.max_text_length);
                let mime = mime.unwrap_or_else(|| DEFAULT_TEXT_MIME.to_string());
                Ok(ExtractedContent::text(kept, mime).with_truncated(kept.len() < text.len()))
            }
            Err(err) => {
                let bytes = err.into_bytes();
                let prefix = &bytes[..bytes.len().min(self.binary_prefix_bytes)];
                let decoded = String::from_utf8_lossy(prefix);
                if !has_usable_text(&decoded) {
                    tracing::debug!(path = %path.display(), "no decodable text in binary file");
                    return Ok(ExtractedContent::binary());
                }
                let kept = truncate_chars(&decoded, self.max_text_length);
                Ok(ExtractedContent::text(kept, OCTET_STREAM).with_truncated(kept.len() < decoded.len()))
            }
        }
    }
}

/// Load with default limits.
pub fn load(path: impl AsRef<Path>) -> Result<ExtractedContent> {
    ContentLoader::default().load(path)
}

/// MIME type guessed from the file extension.
pub fn guess_mime(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

fn has_usable_text(decoded: &str) -> bool {
    decoded
        .chars()
        .any(|c| c != char::REPLACEMENT_CHARACTER && !c.is_control() && !c.is_whitespace())
}

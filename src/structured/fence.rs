//! Markdown code-fence stripping for model output.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// A line made only of a fence marker, optionally followed by a language tag.
static FENCE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:`{3,}|~{3,})[\w.+#-]*\s*$").expect("fence pattern is valid")
});

pub fn starts_with_fence(text: &str) -> bool {
    text.starts_with("```") || text.starts_with("~~~")
}

pub fn is_fence_line(line: &str) -> bool {
    FENCE_LINE.is_match(line)
}

/// Remove pure fence-marker lines when `text` opens with a fence.
///
/// All other lines are kept verbatim and rejoined with `\n`. Text that does
/// not start with a fence is returned unchanged.
pub fn strip_code_fences(text: &str) -> Cow<'_, str> {
    if !starts_with_fence(text) {
        return Cow::Borrowed(text);
    }
    let kept: Vec<&str> = text.lines().filter(|line| !is_fence_line(line)).collect();
    Cow::Owned(kept.join("\n"))
}

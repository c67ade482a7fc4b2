//! Response interpretation.
//!
//! Turns the raw body of a chat-completions response into a
//! [`ClassificationOutcome`]. Any failure along the way becomes an
//! [`ErrorResult`] value, so [`interpret`] never returns an error.
//!
//! # Examples
//!
//! ```
//! use llm_classify::structured::interpret;
//!
//! let body = r#"{"choices":[{"message":{"content":"```json\n{\"category_path\":\"Work/Reports\",\"suggested_filename\":\"q3_report\",\"confidence\":0.9}\n```"}}]}"#;
//! let outcome = interpret(body);
//! let classification = outcome.classification().unwrap();
//! assert_eq!(classification.category_path(), Some("Work/Reports"));
//! assert_eq!(outcome.exit_code(), 0);
//! ```

pub mod fence;
pub mod interpret;
pub mod result;

pub use fence::{is_fence_line, starts_with_fence, strip_code_fences};
pub use interpret::{extract_message_text, interpret};
pub use result::{
    Classification, ClassificationOutcome, ErrorResult, PARSE_FAILED, REQUEST_FAILED,
    UNEXPECTED_FORMAT,
};

use super::fence::strip_code_fences;
use super::result::{Classification, ClassificationOutcome, ErrorResult};
use serde_json::Value;

/// Interpret the raw body of a chat-completions response.
///
/// 1. No `choices[0].message.content` string: `Unexpected response format`
///    carrying the full body.
/// 2. Trim, strip markdown fences, parse strictly as JSON.
/// 3. Parse failure: `Failed to parse JSON` carrying the stripped text.
pub fn interpret(raw_body: &str) -> ClassificationOutcome {
    let Some(message) = extract_message_text(raw_body) else {
        tracing::warn!("response has no choices[0].message.content");
        return ErrorResult::unexpected_format(raw_body).into();
    };

    let text = strip_code_fences(message.trim());
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => ClassificationOutcome::Classified(Classification::from_value(value)),
        Err(e) => {
            tracing::warn!(error = %e, raw_response = %text, "could not parse JSON from model output");
            ErrorResult::parse_failed(text.into_owned()).into()
        }
    }
}

/// Assistant message text of the first choice, if the body has one.
pub fn extract_message_text(raw_body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw_body).ok()?;
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

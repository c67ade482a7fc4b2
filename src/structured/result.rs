use serde::Serialize;
use serde_json::Value;

pub const UNEXPECTED_FORMAT: &str = "Unexpected response format";
pub const PARSE_FAILED: &str = "Failed to parse JSON";
pub const REQUEST_FAILED: &str = "Request failed";

/// Parsed model answer.
///
/// Holds whatever JSON the model returned. Key presence is not enforced;
/// the accessors return `None` when a key is missing or mistyped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Classification(Value);

impl Classification {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// `Level1/Level2` category path.
    pub fn category_path(&self) -> Option<&str> {
        self.0.get("category_path").and_then(Value::as_str)
    }

    pub fn suggested_filename(&self) -> Option<&str> {
        self.0.get("suggested_filename").and_then(Value::as_str)
    }

    /// Model confidence, expected in `[0, 1]`.
    pub fn confidence(&self) -> Option<f64> {
        self.0.get("confidence").and_then(Value::as_f64)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Structured failure that is still valid output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_response: None,
        }
    }

    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        self.raw_response = Some(raw.into());
        self
    }

    pub fn unexpected_format(raw_body: impl Into<String>) -> Self {
        Self::new(UNEXPECTED_FORMAT).with_raw_response(raw_body)
    }

    pub fn parse_failed(text: impl Into<String>) -> Self {
        Self::new(PARSE_FAILED).with_raw_response(text)
    }

    pub fn request_failed(err: &dyn std::fmt::Display) -> Self {
        Self::new(format!("{}: {}", REQUEST_FAILED, err))
    }
}

/// Outcome of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassificationOutcome {
    Classified(Classification),
    Failed(ErrorResult),
}

impl ClassificationOutcome {
    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }

    pub fn classification(&self) -> Option<&Classification> {
        match self {
            Self::Classified(c) => Some(c),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            Self::Classified(_) => None,
            Self::Failed(e) => Some(e),
        }
    }

    /// Process exit code for the CLI: 0 when classified, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_classified() {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl From<ErrorResult> for ClassificationOutcome {
    fn from(e: ErrorResult) -> Self {
        Self::Failed(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_tolerate_missing_keys() {
        let c = Classification::from_value(json!({"category_path": "Work/Reports"}));
        assert_eq!(c.category_path(), Some("Work/Reports"));
        assert_eq!(c.suggested_filename(), None);
        assert_eq!(c.confidence(), None);
        assert_eq!(c.into_value(), json!({"category_path": "Work/Reports"}));
    }

    #[test]
    fn classified_serializes_as_the_model_object() {
        let outcome = ClassificationOutcome::Classified(Classification::from_value(
            json!({"category_path": "Finance/Invoices", "suggested_filename": "invoice_acme", "confidence": 0.7}),
        ));
        let value: Value = serde_json::from_str(&outcome.to_json(false).unwrap()).unwrap();
        assert_eq!(value["category_path"], "Finance/Invoices");
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn error_envelope_omits_absent_raw_response() {
        let outcome: ClassificationOutcome =
            ErrorResult::request_failed(&"connection refused").into();
        assert_eq!(
            outcome.to_json(false).unwrap(),
            r#"{"error":"Request failed: connection refused"}"#
        );
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn pretty_output_is_indented() {
        let outcome: ClassificationOutcome = ErrorResult::parse_failed("nope").into();
        let pretty = outcome.to_json(true).unwrap();
        assert!(pretty.contains("\n  \"error\": \"Failed to parse JSON\""));
    }
}

use serde::Serialize;
use thiserror::Error;

use crate::answers::Category;

/// Everything the questionnaire can refuse to do.
///
/// None of these are recoverable runtime conditions in the usual sense: they
/// mean the caller drove the session out of order or passed a value outside
/// the closed answer domains.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// Scoring was requested before every category had an answer.
    #[error("answers incomplete: missing {}", join_categories(.missing))]
    Incomplete { missing: Vec<Category> },

    /// Category string outside {spec, size, intl, pricing}.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Value string outside the domain of its category.
    #[error("unknown value '{value}' for category '{category}'")]
    UnknownValue { category: Category, value: String },

    /// A selection arrived while no question was on screen.
    #[error("no question is open (session is at {state})")]
    NotAtStep { state: &'static str },

    /// A selection arrived for a different question than the open one.
    #[error("step {step} expects '{expected}', got '{received}'")]
    OutOfStep {
        step: u8,
        expected: Category,
        received: Category,
    },
}

impl WizardError {
    /// Machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            WizardError::Incomplete { .. } => codes::INCOMPLETE_ANSWERS,
            WizardError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            WizardError::UnknownValue { .. } => codes::UNKNOWN_VALUE,
            WizardError::NotAtStep { .. } | WizardError::OutOfStep { .. } => {
                codes::INVALID_TRANSITION
            }
        }
    }

    /// Structured body for adapters that print or ship errors.
    pub fn to_body(&self) -> ErrorBody {
        let (field, received, docs_hint) = match self {
            WizardError::Incomplete { missing } => (
                None,
                None,
                Some(format!(
                    "Answer {} before requesting a report",
                    join_categories(missing)
                )),
            ),
            WizardError::UnknownCategory(raw) => (
                None,
                Some(serde_json::Value::String(raw.clone())),
                Some("Valid categories: spec, size, intl, pricing".to_string()),
            ),
            WizardError::UnknownValue { category, value } => (
                Some(category.as_str().to_string()),
                Some(serde_json::Value::String(value.clone())),
                Some(format!(
                    "Valid values: {}",
                    category.allowed_values().join(", ")
                )),
            ),
            WizardError::NotAtStep { .. } => (
                None,
                None,
                Some("Start the questionnaire before selecting options".to_string()),
            ),
            WizardError::OutOfStep {
                expected, received, ..
            } => (
                Some(expected.as_str().to_string()),
                Some(serde_json::Value::String(received.as_str().to_string())),
                None,
            ),
        };

        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
            field,
            received,
            docs_hint,
        }
    }
}

fn join_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Structured error output. Enough for a script or a human to see what
/// went wrong and which value to send instead.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (see [`codes`])
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// Category that caused the error (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The value that was received (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<serde_json::Value>,
    /// Hint about what correct input looks like
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_hint: Option<String>,
}

/// Error codes used across the questionnaire
pub mod codes {
    pub const INCOMPLETE_ANSWERS: &str = "incomplete_answers";
    pub const UNKNOWN_CATEGORY: &str = "unknown_category";
    pub const UNKNOWN_VALUE: &str = "unknown_value";
    pub const INVALID_TRANSITION: &str = "invalid_transition";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_value_body_lists_the_valid_values() {
        let err = WizardError::UnknownValue {
            category: Category::Size,
            value: "huge".to_string(),
        };
        let body = err.to_body();
        assert_eq!(body.error, codes::UNKNOWN_VALUE);
        assert_eq!(body.field.as_deref(), Some("size"));
        assert_eq!(
            body.docs_hint.as_deref(),
            Some("Valid values: small, medium, large")
        );
    }

    #[test]
    fn incomplete_message_names_every_missing_category() {
        let err = WizardError::Incomplete {
            missing: vec![Category::Reach, Category::Pricing],
        };
        assert_eq!(err.to_string(), "answers incomplete: missing intl, pricing");
        assert_eq!(err.code(), codes::INCOMPLETE_ANSWERS);
    }

    #[test]
    fn transition_errors_share_one_code() {
        let not_at_step = WizardError::NotAtStep { state: "intro" };
        let out_of_step = WizardError::OutOfStep {
            step: 2,
            expected: Category::Size,
            received: Category::Specialization,
        };
        assert_eq!(not_at_step.code(), out_of_step.code());
        let json = serde_json::to_value(out_of_step.to_body()).unwrap();
        assert_eq!(json["field"], "size");
        assert_eq!(json["received"], "spec");
        assert!(json.get("docs_hint").is_none());
    }
}

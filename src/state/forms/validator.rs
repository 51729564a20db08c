//! Field validation rules

use super::field::{FieldKind, FormField};
use regex::Regex;
use std::sync::LazyLock;

/// Minimum trimmed length of a message
pub const MIN_MESSAGE_CHARS: usize = 10;

pub const REQUIRED_MESSAGE: &str = "field required.";
pub const INVALID_EMAIL_MESSAGE: &str = "invalid email.";
pub const SHORT_MESSAGE_MESSAGE: &str = "message too short (min 10 chars).";

static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error_message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            error_message: Some(message.to_string()),
        }
    }
}

/// Validate a field. The first failing rule wins.
pub fn validate(field: &FormField) -> ValidationResult {
    let value = field.value.trim();

    if field.required && value.is_empty() {
        return ValidationResult::invalid(REQUIRED_MESSAGE);
    }

    match field.kind {
        FieldKind::Email if !value.is_empty() && !is_email_shaped(value) => {
            ValidationResult::invalid(INVALID_EMAIL_MESSAGE)
        }
        FieldKind::Message if value.chars().count() < MIN_MESSAGE_CHARS => {
            ValidationResult::invalid(SHORT_MESSAGE_MESSAGE)
        }
        _ => ValidationResult::ok(),
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`
pub fn is_email_shaped(value: &str) -> bool {
    match EMAIL_SHAPE.as_ref() {
        Some(re) => re.is_match(value),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, required: bool, value: &str) -> FormField {
        let mut field = FormField::new("f", "F", kind, required);
        field.set_text(value);
        field
    }

    mod required_rule {
        use super::*;

        #[test]
        fn test_blank_required_field_fails_for_every_kind() {
            for kind in [FieldKind::Text, FieldKind::Email, FieldKind::Message] {
                for value in ["", "   ", "\n\t"] {
                    let result = validate(&field(kind, true, value));
                    assert!(!result.valid, "{kind:?} {value:?}");
                    assert_eq!(result.error_message.as_deref(), Some(REQUIRED_MESSAGE));
                }
            }
        }

        #[test]
        fn test_optional_blank_text_is_valid() {
            assert_eq!(validate(&field(FieldKind::Text, false, "")), ValidationResult::ok());
        }
    }

    mod email_rule {
        use super::*;

        #[test]
        fn test_simple_address_is_valid() {
            assert!(validate(&field(FieldKind::Email, true, "a@b.co")).valid);
        }

        #[test]
        fn test_surrounding_whitespace_is_trimmed() {
            assert!(validate(&field(FieldKind::Email, true, "  a@b.co ")).valid);
        }

        #[test]
        fn test_not_an_email_is_invalid() {
            let result = validate(&field(FieldKind::Email, true, "not-an-email"));
            assert!(!result.valid);
            assert_eq!(result.error_message.as_deref(), Some(INVALID_EMAIL_MESSAGE));
        }

        #[test]
        fn test_empty_optional_email_is_valid() {
            assert!(validate(&field(FieldKind::Email, false, "")).valid);
        }

        #[test]
        fn test_shape_edge_cases() {
            assert!(!is_email_shaped("a@b"));
            assert!(!is_email_shaped("a b@c.de"));
            assert!(!is_email_shaped("a@@b.co"));
            assert!(!is_email_shaped("@b.co"));
            assert!(is_email_shaped("first.last@sub.example.org"));
        }
    }

    mod message_rule {
        use super::*;

        #[test]
        fn test_nine_chars_is_too_short() {
            let result = validate(&field(FieldKind::Message, true, "123456789"));
            assert!(!result.valid);
            assert_eq!(result.error_message.as_deref(), Some(SHORT_MESSAGE_MESSAGE));
        }

        #[test]
        fn test_ten_chars_is_valid() {
            assert!(validate(&field(FieldKind::Message, true, "1234567890")).valid);
        }

        #[test]
        fn test_length_counts_trimmed_value() {
            assert!(!validate(&field(FieldKind::Message, true, "   123456789   ")).valid);
        }

        #[test]
        fn test_length_counts_characters_not_bytes() {
            assert!(!validate(&field(FieldKind::Message, true, "ñññññññññ")).valid);
            assert!(validate(&field(FieldKind::Message, true, "ññññññññññ")).valid);
        }
    }
}

//! Form field value objects

/// What kind of input a field holds, which selects its validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Message,
}

/// Validation state of a field, mapped to presentation by the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Neutral,
    Error(String),
    Success,
}

impl FieldState {
    pub fn is_error(&self) -> bool {
        matches!(self, FieldState::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FieldState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
    pub state: FieldState,
}

impl FormField {
    pub fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            kind,
            required,
            state: FieldState::Neutral,
        }
    }

    /// Message fields accept newlines
    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Message
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Replace the value. Any validation state is cleared.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.state = FieldState::Neutral;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if c == '\n' && !self.is_multiline() {
            return;
        }
        self.value.push(c);
        self.state = FieldState::Neutral;
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if self.value.pop().is_some() {
            self.state = FieldState::Neutral;
        }
    }

    /// Empty the value and reset the state
    pub fn clear(&mut self) {
        self.value.clear();
        self.state = FieldState::Neutral;
    }

    /// Label with a required marker
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_field() -> FormField {
        FormField::new("email", "Email", FieldKind::Email, true)
    }

    #[test]
    fn test_new_field_is_neutral_and_empty() {
        let field = email_field();
        assert_eq!(field.as_text(), "");
        assert_eq!(field.state, FieldState::Neutral);
    }

    #[test]
    fn test_editing_clears_error_state() {
        let mut field = email_field();
        field.state = FieldState::Error("invalid email.".to_string());
        field.push_char('a');
        assert_eq!(field.state, FieldState::Neutral);
    }

    #[test]
    fn test_editing_clears_success_state() {
        let mut field = email_field();
        field.set_text("a@b.co");
        field.state = FieldState::Success;
        field.pop_char();
        assert_eq!(field.state, FieldState::Neutral);
        assert_eq!(field.as_text(), "a@b.c");
    }

    #[test]
    fn test_pop_on_empty_keeps_state() {
        let mut field = email_field();
        field.state = FieldState::Error("field required.".to_string());
        field.pop_char();
        assert!(field.state.is_error());
    }

    #[test]
    fn test_newline_only_in_message_fields() {
        let mut name = FormField::new("name", "Name", FieldKind::Text, true);
        name.push_char('\n');
        assert_eq!(name.as_text(), "");

        let mut message = FormField::new("message", "Message", FieldKind::Message, true);
        message.push_char('\n');
        assert_eq!(message.as_text(), "\n");
        assert!(message.is_multiline());
    }

    #[test]
    fn test_display_label_marks_required() {
        assert_eq!(email_field().display_label(), "Email *");
        let subject = FormField::new("subject", "Subject", FieldKind::Text, false);
        assert_eq!(subject.display_label(), "Subject");
    }

    #[test]
    fn test_error_message_accessor() {
        let state = FieldState::Error("field required.".to_string());
        assert_eq!(state.error_message(), Some("field required."));
        assert_eq!(FieldState::Success.error_message(), None);
    }
}

//! Contact form state

use super::field::{FieldKind, FieldState, FormField};
use crate::transport::{FormData, TransportError};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// Submit lifecycle of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Submitted,
    Failed,
}

/// The submit control: label, enabled flag and busy indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
    original_label: Option<String>,
}

impl SubmitButton {
    pub const LABEL: &'static str = "Send message";
    pub const BUSY_LABEL: &'static str = "Sending...";

    pub fn new() -> Self {
        Self {
            label: Self::LABEL.to_string(),
            enabled: true,
            busy: false,
            original_label: None,
        }
    }

    /// Disable the control and show the busy label
    pub fn begin_busy(&mut self) {
        let original = std::mem::replace(&mut self.label, Self::BUSY_LABEL.to_string());
        self.original_label = Some(original);
        self.enabled = false;
        self.busy = true;
    }

    /// Re-enable the control and put the original label back
    pub fn restore(&mut self) {
        if let Some(original) = self.original_label.take() {
            self.label = original;
        }
        self.enabled = true;
        self.busy = false;
    }
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a submit attempt was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Success,
    Failure,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub status: SubmissionStatus,
    pub reason: Option<String>,
}

impl SubmissionOutcome {
    pub fn from_result(result: &Result<(), TransportError>) -> Self {
        match result {
            Ok(()) => Self {
                status: SubmissionStatus::Success,
                reason: None,
            },
            Err(e) => Self {
                status: SubmissionStatus::Failure,
                reason: Some(e.to_string()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }
}

/// Contact form: four fields plus the submit button row
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: FormField,
    pub email: FormField,
    pub subject: FormField,
    pub message: FormField,
    pub active_field_index: usize,
    pub submit_button: SubmitButton,
    pub phase: FormPhase,
    pub last_outcome: Option<SubmissionOutcome>,
}

impl ContactForm {
    /// Index of the submit button row
    pub const SUBMIT_ROW: usize = 4;

    pub fn new() -> Self {
        Self {
            name: FormField::new("name", "Name", FieldKind::Text, true),
            email: FormField::new("email", "Email", FieldKind::Email, true),
            subject: FormField::new("subject", "Subject", FieldKind::Text, false),
            message: FormField::new("message", "Message", FieldKind::Message, true),
            active_field_index: 0,
            submit_button: SubmitButton::new(),
            phase: FormPhase::Idle,
            last_outcome: None,
        }
    }

    pub fn fields(&self) -> [&FormField; 4] {
        [&self.name, &self.email, &self.subject, &self.message]
    }

    pub fn fields_mut(&mut self) -> [&mut FormField; 4] {
        [
            &mut self.name,
            &mut self.email,
            &mut self.subject,
            &mut self.message,
        ]
    }

    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == Self::SUBMIT_ROW
    }

    /// Snapshot of every field value
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        for field in self.fields() {
            data.insert(field.name.clone(), field.value.clone());
        }
        data
    }

    /// Clear every value and validation state and focus the first field
    pub fn reset(&mut self) {
        for field in self.fields_mut() {
            field.clear();
        }
        self.active_field_index = 0;
    }

    /// Drop every inline error. Safe to call repeatedly.
    pub fn clear_all_errors(&mut self) {
        for field in self.fields_mut() {
            if field.state.is_error() {
                field.state = FieldState::Neutral;
            }
        }
    }

    pub fn error_count(&self) -> usize {
        self.fields().iter().filter(|f| f.state.is_error()).count()
    }

    pub(crate) fn transition(&mut self, next: FormPhase) {
        tracing::debug!(from = ?self.phase, to = ?next, "contact form phase");
        self.phase = next;
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        5 // name, email, subject, message, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::SUBMIT_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.subject),
            3 => Some(&mut self.message),
            _ => None,
        }
    }
}

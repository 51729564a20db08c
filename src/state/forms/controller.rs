//! Contact form submit lifecycle
//!
//! `begin_submit` validates and puts the form into its busy state,
//! `complete_submit` applies the transport result. The app runs the transport
//! call between the two on a spawned task; `submit` does all three in line.

use super::contact_form::{ContactForm, FormPhase, SubmissionOutcome};
use super::field::{FieldState, FormField};
use super::validator;
use crate::state::notification::{NotificationService, Severity};
use crate::transport::{FormData, SubmissionTransport, TransportError};
use std::sync::Arc;
use std::time::Instant;

pub const SUCCESS_MESSAGE: &str = "Message sent! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "Could not send your message. Please try again or contact me directly.";

/// Orchestrates validation and delivery of the contact form
#[derive(Clone)]
pub struct FormController {
    transport: Arc<dyn SubmissionTransport>,
}

impl FormController {
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn SubmissionTransport> {
        Arc::clone(&self.transport)
    }

    /// Validate one field and record the result on it
    pub fn validate_field(field: &mut FormField) -> bool {
        let result = validator::validate(field);
        field.state = match result.error_message {
            Some(message) if !result.valid => FieldState::Error(message),
            _ => FieldState::Success,
        };
        result.valid
    }

    /// Validate every required field. All of them are checked so each one
    /// gets its inline message.
    pub fn validate_form(form: &mut ContactForm) -> bool {
        let mut all_valid = true;
        for field in form.fields_mut() {
            if field.required && !Self::validate_field(field) {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Validate the field that is losing focus
    pub fn blur_active(form: &mut ContactForm) {
        use super::contact_form::Form;
        if let Some(field) = form.get_active_field_mut() {
            Self::validate_field(field);
        }
    }

    /// Validate and enter the busy state. Returns the data to deliver, or
    /// `None` when the form is invalid or a submission is already in flight.
    pub fn begin_submit(&self, form: &mut ContactForm) -> Option<FormData> {
        if !form.submit_button.enabled || form.phase == FormPhase::Submitting {
            tracing::debug!("submit ignored, submission already in flight");
            return None;
        }

        form.transition(FormPhase::Validating);
        if !Self::validate_form(form) {
            tracing::info!(errors = form.error_count(), "contact form has invalid fields");
            form.transition(FormPhase::Invalid);
            form.transition(FormPhase::Idle);
            return None;
        }

        form.transition(FormPhase::Submitting);
        form.submit_button.begin_busy();
        tracing::info!(transport = self.transport.name(), "submitting contact form");
        Some(form.form_data())
    }

    /// Apply the transport result, notify the user and release the submit control
    pub fn complete_submit(
        &self,
        form: &mut ContactForm,
        result: Result<(), TransportError>,
        notifications: &mut NotificationService,
        now: Instant,
    ) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::from_result(&result);

        match result {
            Ok(()) => {
                form.transition(FormPhase::Submitted);
                form.reset();
                form.clear_all_errors();
                notifications.show(SUCCESS_MESSAGE, Severity::Success, now);
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    transport = self.transport.name(),
                    "contact form submission failed"
                );
                form.transition(FormPhase::Failed);
                notifications.show(FAILURE_MESSAGE, Severity::Error, now);
            }
        }

        form.submit_button.restore();
        form.last_outcome = Some(outcome.clone());
        form.transition(FormPhase::Idle);
        outcome
    }

    /// Validate, deliver and apply the result in one call
    pub async fn submit(
        &self,
        form: &mut ContactForm,
        notifications: &mut NotificationService,
    ) -> Option<SubmissionOutcome> {
        let data = self.begin_submit(form)?;
        let result = self.transport.send(data).await;
        Some(self.complete_submit(form, result, notifications, Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::SubmitButton;
    use crate::transport::MockSubmissionTransport;

    fn mock_transport(succeed: bool, calls: usize) -> Arc<dyn SubmissionTransport> {
        let mut mock = MockSubmissionTransport::new();
        mock.expect_send().times(calls).returning(move |_| {
            if succeed {
                Ok(())
            } else {
                Err(TransportError::Simulated)
            }
        });
        mock.expect_name().return_const("mock");
        Arc::new(mock)
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.name.set_text("Ada Lovelace");
        form.email.set_text("ada@example.com");
        form.message.set_text("Let's build an engine together.");
        form
    }

    mod validation {
        use super::*;

        #[test]
        fn test_validate_field_sets_error_state() {
            let mut form = ContactForm::new();
            assert!(!FormController::validate_field(&mut form.email));
            assert_eq!(
                form.email.state,
                FieldState::Error(validator::REQUIRED_MESSAGE.to_string())
            );
        }

        #[test]
        fn test_validate_field_sets_success_state() {
            let mut form = filled_form();
            assert!(FormController::validate_field(&mut form.email));
            assert_eq!(form.email.state, FieldState::Success);
        }

        #[test]
        fn test_validate_form_skips_optional_fields() {
            let mut form = filled_form();
            assert!(FormController::validate_form(&mut form));
            assert_eq!(form.subject.state, FieldState::Neutral);
        }

        #[test]
        fn test_validate_form_marks_every_invalid_field() {
            let mut form = ContactForm::new();
            assert!(!FormController::validate_form(&mut form));
            assert_eq!(form.error_count(), 3);
        }

        #[test]
        fn test_blur_validates_active_field_only() {
            let mut form = ContactForm::new();
            form.active_field_index = 1;
            FormController::blur_active(&mut form);
            assert!(form.email.state.is_error());
            assert_eq!(form.name.state, FieldState::Neutral);
        }

        #[test]
        fn test_blur_on_submit_row_is_noop() {
            let mut form = ContactForm::new();
            form.active_field_index = ContactForm::SUBMIT_ROW;
            FormController::blur_active(&mut form);
            assert_eq!(form.error_count(), 0);
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_form_never_calls_transport() {
            let controller = FormController::new(mock_transport(true, 0));
            let mut notifications = NotificationService::new();
            let mut form = ContactForm::new();
            form.name.set_text("Ada");
            form.message.set_text("A long enough message");

            let outcome = controller.submit(&mut form, &mut notifications).await;

            assert!(outcome.is_none());
            assert!(form.submit_button.enabled);
            assert_eq!(form.submit_button.label, SubmitButton::LABEL);
            assert_eq!(notifications.visible_count(), 0);
            assert_eq!(form.error_count(), 1);
            assert!(form.email.state.is_error());
            assert_eq!(form.phase, FormPhase::Idle);
        }

        #[tokio::test]
        async fn test_success_resets_form_and_notifies() {
            let controller = FormController::new(mock_transport(true, 1));
            let mut notifications = NotificationService::new();
            let mut form = filled_form();

            let outcome = controller.submit(&mut form, &mut notifications).await.unwrap();

            assert!(outcome.is_success());
            assert!(form.fields().iter().all(|f| f.value.is_empty()));
            assert_eq!(form.error_count(), 0);
            assert_eq!(notifications.visible_count(), 1);
            let toast = notifications.current().unwrap();
            assert_eq!(toast.notification.severity, Severity::Success);
            assert_eq!(toast.notification.message, SUCCESS_MESSAGE);
            assert_eq!(form.submit_button, SubmitButton::new());
            assert_eq!(form.phase, FormPhase::Idle);
            assert_eq!(form.last_outcome, Some(outcome));
        }

        #[tokio::test]
        async fn test_failure_keeps_values_and_notifies_error() {
            let controller = FormController::new(mock_transport(false, 1));
            let mut notifications = NotificationService::new();
            let mut form = filled_form();

            let outcome = controller.submit(&mut form, &mut notifications).await.unwrap();

            assert!(!outcome.is_success());
            assert_eq!(form.name.as_text(), "Ada Lovelace");
            assert_eq!(form.email.as_text(), "ada@example.com");
            let toast = notifications.current().unwrap();
            assert_eq!(toast.notification.severity, Severity::Error);
            assert_eq!(toast.notification.message, FAILURE_MESSAGE);
            assert!(form.submit_button.enabled);
            assert_eq!(form.submit_button.label, SubmitButton::LABEL);
        }

        #[test]
        fn test_begin_submit_disables_control_and_blocks_second_submit() {
            let controller = FormController::new(mock_transport(true, 0));
            let mut form = filled_form();

            let data = controller.begin_submit(&mut form).unwrap();
            assert_eq!(data.get("email"), Some("ada@example.com"));
            assert_eq!(form.phase, FormPhase::Submitting);
            assert!(!form.submit_button.enabled);
            assert_eq!(form.submit_button.label, SubmitButton::BUSY_LABEL);

            assert!(controller.begin_submit(&mut form).is_none());
            assert_eq!(form.phase, FormPhase::Submitting);
        }

        #[test]
        fn test_complete_submit_restores_control_on_failure() {
            let controller = FormController::new(mock_transport(false, 0));
            let mut notifications = NotificationService::new();
            let mut form = filled_form();
            controller.begin_submit(&mut form).unwrap();

            controller.complete_submit(
                &mut form,
                Err(TransportError::Simulated),
                &mut notifications,
                Instant::now(),
            );

            assert!(form.submit_button.enabled);
            assert!(!form.submit_button.busy);
            assert_eq!(form.phase, FormPhase::Idle);
        }

        #[test]
        fn test_submit_from_sync_context() {
            let controller = FormController::new(mock_transport(true, 1));
            let mut notifications = NotificationService::new();
            let mut form = filled_form();

            let outcome = tokio_test::block_on(controller.submit(&mut form, &mut notifications));
            assert!(outcome.unwrap().is_success());
        }
    }
}

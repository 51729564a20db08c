//! Contact form domain layer
//!
//! Field values and validation state, the validation rules, and the
//! controller that drives a submission through its lifecycle.

mod contact_form;
mod controller;
mod field;
mod validator;

pub use contact_form::{
    ContactForm, Form, FormPhase, SubmissionOutcome, SubmissionStatus, SubmitButton,
};
pub use controller::{FormController, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use field::{FieldKind, FieldState, FormField};
pub use validator::{validate, ValidationResult};

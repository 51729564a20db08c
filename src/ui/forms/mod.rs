//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `contact_form`: The contact form view and its geometry

mod contact_form;
mod field_renderer;

pub use contact_form::{draw_contact_form, form_target_at};

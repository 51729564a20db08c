//! Contact form delivery
//!
//! The form controller only knows the [`SubmissionTransport`] capability.
//! The simulated transport stands in for a real endpoint; the outbox
//! transport keeps submissions in a local JSON-lines file.

mod outbox;
mod simulated;
mod traits;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub use outbox::OutboxTransport;
pub use simulated::SimulatedTransport;
pub use traits::SubmissionTransport;

#[cfg(test)]
pub use traits::MockSubmissionTransport;

/// Field values captured from the contact form, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Why a submission could not be delivered
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("simulated delivery failure")]
    Simulated,
    #[error("failed to write outbox {path}: {source}")]
    Outbox {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("submission task stopped: {0}")]
    Interrupted(String),
}

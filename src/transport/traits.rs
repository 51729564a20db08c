//! Trait abstraction for submission delivery to enable mocking in tests

use super::{FormData, TransportError};
use async_trait::async_trait;

/// Delivers contact form data somewhere
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Deliver one submission
    async fn send(&self, data: FormData) -> Result<(), TransportError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

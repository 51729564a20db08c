//! Stand-in transport that succeeds most of the time after a delay

use super::{FormData, SubmissionTransport, TransportError};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Waits `delay`, then succeeds with probability `success_rate`
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    success_rate: f64,
}

impl SimulatedTransport {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

    pub fn new(delay: Duration, success_rate: f64) -> Self {
        Self {
            delay,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, Self::DEFAULT_SUCCESS_RATE)
    }
}

#[async_trait]
impl SubmissionTransport for SimulatedTransport {
    async fn send(&self, data: FormData) -> Result<(), TransportError> {
        tracing::debug!(
            fields = data.len(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating submission"
        );
        tokio::time::sleep(self.delay).await;

        if rand::thread_rng().gen_bool(self.success_rate) {
            Ok(())
        } else {
            Err(TransportError::Simulated)
        }
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

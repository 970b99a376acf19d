//! Stand-in backend that accepts every registration after a fixed delay

use super::traits::{Registration, SubmissionBackend, SubmissionError, SubmissionReceipt};
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated network latency
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// Backend that sleeps for `latency` and then succeeds
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
}

impl SimulatedBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, registration: &Registration) -> Result<SubmissionReceipt, SubmissionError> {
        tokio::time::sleep(self.latency).await;

        let payload = serde_json::to_string(&registration.fields)
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        tracing::info!(%payload, "Registration submitted");

        Ok(SubmissionReceipt::new())
    }
}

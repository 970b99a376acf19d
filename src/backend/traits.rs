//! Trait abstraction for the submission backend to enable mocking in tests

use crate::state::FieldValue;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// A completed registration as handed to the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Registration {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Registration {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

/// Acknowledgement of an accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub confirmation_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            confirmation_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }

    /// First block of the confirmation id, for display
    pub fn short_id(&self) -> String {
        self.confirmation_id
            .to_string()
            .split('-')
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Submission timed out")]
    Timeout,
    #[error("Registration rejected: {0}")]
    Rejected(String),
    #[error("Submission cancelled")]
    Cancelled,
}

/// Trait for submission operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Submit a registration and wait for the outcome
    async fn submit(&self, registration: &Registration) -> Result<SubmissionReceipt, SubmissionError>;
}

//! Submission backend for completed registrations

mod simulated;
mod traits;

pub use simulated::SimulatedBackend;
pub use traits::{Registration, SubmissionBackend, SubmissionError, SubmissionReceipt};

#[cfg(test)]
pub use traits::MockSubmissionBackend;

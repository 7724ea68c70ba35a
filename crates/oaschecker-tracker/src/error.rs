//! Errors from the `IssueTracker` collaborator. Always non-fatal to the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("issue tracker request failed: {reason}")]
    Request { reason: String },

    #[error("issue tracker returned an unexpected response: {reason}")]
    UnexpectedResponse { reason: String },
}

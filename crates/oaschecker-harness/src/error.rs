//! Error types for the test harness's process execution layer.

use thiserror::Error;

/// Errors raised while preparing or executing a harness run.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("native execution failed: {reason}")]
    NativeExecutionFailed { reason: String },

    #[error("failed to spawn process: {reason}")]
    SpawnFailed { reason: String },

    #[error("harness workspace could not be prepared: {reason}")]
    SetupFailed { reason: String },

    #[error("execution timed out after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },
}

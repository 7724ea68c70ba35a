//! Errors for spec loading and normalization (C1/C2).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("unsupported source scheme in `{0}`")]
    UnsupportedSource(String),

    #[error("failed to fetch spec from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to read spec from {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse spec: {reason}")]
    Parse { reason: String },

    #[error("spec has unexpected structure at {path}: {reason}")]
    Structure { path: String, reason: String },
}

//! Spec Loader (C1) and Spec Normalizer (C2).

pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;

pub use error::SpecError;
pub use model::{Info, Operation, Parameter, Response, Schema, Specification};

/// Loads and normalizes `source` in one step — the composition C10 drives.
pub async fn load_specification(source: &str) -> Result<Specification, SpecError> {
    let tree = loader::load(source).await?;
    normalize::normalize(&tree)
}

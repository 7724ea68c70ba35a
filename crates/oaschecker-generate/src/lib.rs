//! Generation Fanout (C5).

pub mod fanout;
pub mod types;

pub use fanout::{generate_for_operation, ProviderConcurrency, DEFAULT_PROVIDER_TIMEOUT};
pub use types::{GenerationRecord, TokenAccounting};

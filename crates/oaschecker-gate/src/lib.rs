//! Outcome Classifier (C7): the gate between harness facts and issue creation.

pub mod classify;
pub mod types;

pub use classify::classify;
pub use types::Outcome;

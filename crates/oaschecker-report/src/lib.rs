//! Report Aggregator (C9).

pub mod aggregate;
pub mod emit;
pub mod model;
pub mod scoring;

pub use aggregate::{aggregate, AggregateInput};
pub use emit::{format_for, render, Format};
pub use model::{HarnessResultView, OperationResult, ProviderAggregate, ProviderRunRecord, Ranking, Report};

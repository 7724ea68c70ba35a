//! oaschecker - multi-model OpenAPI contract testing
//!
//! Ingests an OpenAPI document, generates an integration test per operation
//! through one or more LLM providers, executes the generated tests against a
//! live target, and aggregates the results into a comparative report.

pub mod cli;
pub mod orchestrator;

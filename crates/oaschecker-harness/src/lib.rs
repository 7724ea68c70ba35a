//! Test Harness (C6): ephemeral-workspace compile-and-execute of one
//! generated test, plus the reusable argv-only process execution primitives
//! (`CommandSpec`/`ProcessRunner`) it is built on.
//!
//! # Security
//!
//! All process execution goes through [`CommandSpec`], which enforces
//! argv-style invocation: arguments are passed as discrete elements, never
//! interpolated into a shell string. This is essential because the harness
//! executes LLM-authored code.

pub mod async_exec;
pub mod command_spec;
pub mod error;
pub mod harness;
pub mod parse;
pub mod process;
pub mod types;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use harness::{DEFAULT_DEADLINE, HarnessInput, run, test_file_stem};
pub use process::{ProcessOutput, ProcessRunner};
pub use types::{ExitKind, HarnessResult, SubTestCounts, SubTestOutcome, SubTestResult};

//! Foundation utilities shared by every crate in the analysis pipeline:
//! the error taxonomy, exit code mapping, tracing setup, atomic file writes,
//! and a bounded ring buffer for captured subprocess output.

pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod ring_buffer;

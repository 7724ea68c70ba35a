//! Async process execution with a deadline, used by the harness's compile
//! and execute step. Grounded on the same argv-only `CommandSpec` used by
//! the synchronous [`crate::process::ProcessRunner`]; this variant is wired
//! for `tokio`-based cancellation rather than a blocking call.

use crate::command_spec::CommandSpec;
use crate::error::RunnerError;
use crate::process::ProcessOutput;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Child;

/// Spawn `cmd`, capture stdout+stderr, and enforce `timeout`.
///
/// On timeout the child process is killed and `ProcessOutput::timed_out` is
/// set; the function never returns `Err(RunnerError::Timeout)` so that a
/// timeout is representable as a harness fact rather than a propagated error.
///
/// The pipes are drained concurrently with waiting on the child, not after
/// it exits: a chatty child (a `rustc` diagnostic dump routinely exceeds the
/// OS pipe buffer) would otherwise block on write while nothing is reading,
/// so `wait()` would never return and a fast compile error would misreport
/// as a deadline timeout.
pub async fn run_with_deadline(
    cmd: &CommandSpec,
    timeout: Duration,
) -> Result<ProcessOutput, RunnerError> {
    let mut tokio_cmd = cmd.to_tokio_command();
    tokio_cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true);

    let mut child: Child = tokio_cmd
        .spawn()
        .map_err(|e| RunnerError::SpawnFailed { reason: e.to_string() })?;

    let mut stdout_pipe = child.stdout.take().expect("stdout was requested as piped");
    let mut stderr_pipe = child.stderr.take().expect("stderr was requested as piped");

    let work = async {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let (_, _, status) = tokio::join!(
            stdout_pipe.read_to_end(&mut stdout),
            stderr_pipe.read_to_end(&mut stderr),
            child.wait(),
        );
        (status, stdout, stderr)
    };

    match tokio::time::timeout(timeout, work).await {
        Ok((status, stdout, stderr)) => {
            let status = status.map_err(|e| RunnerError::SpawnFailed { reason: e.to_string() })?;
            Ok(ProcessOutput::new(stdout, stderr, status.code(), false))
        }
        Err(_) => {
            let _ = child.start_kill();
            Ok(ProcessOutput::new(Vec::new(), Vec::new(), None, true))
        }
    }
}

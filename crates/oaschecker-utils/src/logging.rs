//! Structured logging setup shared by the CLI and any embedder of the core.
//!
//! `init_tracing` installs a process-wide subscriber; library crates never
//! call it themselves, they only emit `tracing` events and open spans.

use std::io::IsTerminal;
use tracing::{Level, span};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Returns true only when stdout is a TTY and `NO_COLOR` is unset.
#[must_use]
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Install the global tracing subscriber.
///
/// `verbose` selects a structured, target-annotated format; otherwise output
/// is compact and human-readable. `RUST_LOG` always overrides the default
/// filter when set.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        if verbose {
            EnvFilter::try_new("oaschecker=debug,info")
        } else {
            EnvFilter::try_new("oaschecker=info,warn")
        }
    })?;

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_ansi(use_color())
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_ansi(use_color())
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Span scoped to one orchestrator run, carrying the spec source and provider count.
#[must_use]
pub fn run_span(source: &str, provider_count: usize) -> tracing::Span {
    span!(Level::INFO, "analyze_run", source, provider_count)
}

/// Span scoped to one (operation, provider) worker task.
#[must_use]
pub fn operation_span(operation_id: &str, provider: &str) -> tracing::Span {
    span!(Level::INFO, "operation", operation_id, provider)
}

//! Diagnostics initialization for the load tester.
//!
//! Sets up structured logging using the `tracing` ecosystem. Log output goes
//! to **stderr** so that the report printed on stdout stays clean and can be
//! piped.
//!
//! ## Behavior
//!
//! - Pulls filtering rules from `RUST_LOG` or defaults to `warn`.
//! - Includes thread ID, file, and line number for traceability.
//! - Timestamped using local time (RFC 3339 format).
//!
//! Set `RUST_LOG=stampede=debug` to see every failed request with its failure
//! class, or `trace` to follow individual workers.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}

//! Error types for the load tester.
//!
//! This module defines the central `Error` enum, which captures the cases that
//! stop a run or prevent it from starting. Anything that goes wrong while
//! talking to the target server is *not* represented here; it is folded into
//! the status tally instead.
//!
//! ## Error Cases
//! - `InvalidConfig`: Missing or malformed command-line configuration. Raised
//!   before any network activity.
//! - `Client`: The shared HTTP client could not be constructed.
//! - `WorkerPanicked`: A worker task died, so token accounting is incomplete.
//! - `ChannelError`: An internal queue was closed unexpectedly.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the load tester.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The run configuration was rejected during validation.
    #[error("{reason}")]
    InvalidConfig { reason: String },

    /// The HTTP client failed to build (e.g., TLS backend initialization).
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// A worker task panicked or was aborted before draining its share of the
    /// queue.
    #[error("Worker {worker_id} terminated abnormally")]
    WorkerPanicked { worker_id: usize },

    /// Internal channel send/receive failure.
    #[error("Channel error: {context}")]
    ChannelError { context: String },
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was raised while validating configuration,
    /// i.e. before any request was sent.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

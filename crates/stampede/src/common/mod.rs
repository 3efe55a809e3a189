//! Shared types and error definitions used across the load testing pipeline.
//!
//! ## Submodules
//!
//! - [`error`] - Centralized error type for configuration and pipeline faults.
//! - [`types`] - Work tokens and request outcomes exchanged between stages.
//!
//! Per-request network failures are deliberately absent from [`error`]. They
//! are data, recorded as [`Outcome::Failed`](types::Outcome::Failed), and never
//! abort a run.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Outcome, WorkToken};

//! Worker pool draining the shared work queue.
//!
//! - [`manager`] - Spawns the workers and joins them at the end of a run.
//! - [`worker`] - The per-task loop: take a token, hit the target, report.

pub mod manager;
pub mod worker;

pub use manager::WorkerPool;

use crate::common::WorkToken;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// The work queue receiver, shared by every worker.
///
/// `tokio`'s MPSC receiver has a single consumer, so workers take turns
/// behind an async mutex. The lock is only held while waiting for the next
/// token, never across a request.
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<WorkToken>>>;

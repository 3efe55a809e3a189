//! The dispatch → work → aggregate pipeline.
//!
//! ## Structure
//!
//! - [`dispatcher`] - Fills the bounded work queue with one token per request
//!   and closes it.
//! - [`pool`] - Fixed-size set of workers draining the work queue and emitting
//!   one [`Outcome`](crate::Outcome) per token.
//! - [`aggregator`] - Single owner of the [`StatusTally`], fed exclusively by
//!   the results queue.
//! - [`report`] - Human-readable summary of a finished run.
//! - [`runner`] - Wires the stages together and enforces the shutdown order.
//!
//! ## Shutdown order
//!
//! 1. The dispatcher sends its last token and drops the work sender.
//! 2. Each worker drains the closed queue, then drops its results sender.
//! 3. Once the last worker exits, the results queue closes.
//! 4. The aggregator observes the close and returns the tally.

pub mod aggregator;
pub mod dispatcher;
pub mod pool;
pub mod report;
pub mod runner;

pub use aggregator::StatusTally;
pub use report::Report;
pub use runner::{run, run_http};

/// Capacity for a queue that must hold every token (or outcome) of a run
/// without blocking its producer.
///
/// `tokio` channels reject a capacity of zero, so an empty run still gets a
/// one-slot queue.
pub(crate) const fn queue_capacity(total: usize) -> usize {
    if total == 0 { 1 } else { total }
}

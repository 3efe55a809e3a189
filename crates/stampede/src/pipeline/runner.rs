//! Orchestration of a single load test run.
//!
//! The runner owns the only strong ends of both queues and hands them out so
//! that the close signal propagates in one direction: dispatcher → workers →
//! aggregator. Aggregation runs on the calling task while the dispatcher and
//! the pool run on spawned tasks.

use super::{
    aggregator::aggregate, dispatcher::dispatch, pool::WorkerPool, queue_capacity,
    report::Report,
};
use crate::{
    common::{Error, Result},
    config::{LoadConfig, MAX_REQUESTS},
    target::{HttpTarget, Target},
};
use core::time::Duration;
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;

/// Issues `config.total_requests` GETs against `config.url` and reports the
/// status code distribution.
///
/// # Errors
///
/// Fails only if the HTTP client cannot be built or the pipeline itself
/// breaks. Failed requests are counted in the report, never returned.
pub async fn run_http(config: &LoadConfig) -> Result<Report> {
    let target = HttpTarget::new(config)?;
    run(config, target).await
}

/// Runs the dispatch → work → aggregate pipeline against any [`Target`].
///
/// `config.url`, `config.timeout` and `config.follow_redirects` are the
/// target's concern; this function only reads the request count, the
/// concurrency and the optional run deadline.
///
/// Workers beyond the number of requests would find the queue already
/// drained, so at most `max(total_requests, 1)` are spawned.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `config.total_requests` exceeds
///   [`MAX_REQUESTS`].
/// - [`Error::WorkerPanicked`] if a worker task died.
/// - [`Error::ChannelError`] if the dispatcher could not hand out every
///   token.
pub async fn run<T: Target>(config: &LoadConfig, target: T) -> Result<Report> {
    let total = config.total_requests;
    if total > MAX_REQUESTS {
        return Err(Error::invalid_config(format!(
            "requests must not exceed {MAX_REQUESTS}"
        )));
    }
    let workers = config.concurrency.clamp(1, total.max(1));
    let cancel = CancellationToken::new();

    let (work_tx, work_rx) = mpsc::channel(queue_capacity(total));
    let (results_tx, results_rx) = mpsc::channel(queue_capacity(total));

    tracing::info!(
        url = %config.url,
        requests = total,
        concurrency = config.concurrency,
        workers,
        timeout = ?config.timeout,
        "Starting load test"
    );

    let start = Instant::now();

    // `results_tx` is moved into the pool; no clone may outlive the workers or
    // the aggregator below would never observe the close.
    let pool = WorkerPool::spawn(
        workers,
        Arc::new(target),
        work_rx,
        results_tx,
        cancel.clone(),
    );
    let dispatcher = tokio::spawn(dispatch(total, work_tx));
    let deadline = config
        .deadline
        .map(|limit| arm_deadline(limit, cancel.clone()));

    let tally = aggregate(results_rx).await;
    let elapsed = start.elapsed();

    if let Some(timer) = deadline {
        timer.abort();
    }

    // A dead pool also makes the dispatcher fail; report the pool's error.
    let joined = pool.join().await;
    let dispatched = dispatcher
        .await
        .map_err(|e| Error::ChannelError {
            context: format!("Dispatcher task failed: {e}"),
        })
        .and_then(|sent| sent);
    let processed = joined?;
    let dispatched = dispatched?;

    debug_assert_eq!(dispatched, processed);
    debug_assert_eq!(tally.total(), total as u64);

    tracing::info!(
        elapsed = ?elapsed,
        successes = tally.successes(),
        failures = tally.failures(),
        "Load test complete"
    );

    Ok(Report::new(elapsed, total, tally))
}

/// Cancels `cancel` once `limit` has elapsed.
fn arm_deadline(limit: Duration, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(limit).await;
        tracing::warn!("Run deadline of {limit:?} expired, cancelling outstanding requests");
        cancel.cancel();
    })
}

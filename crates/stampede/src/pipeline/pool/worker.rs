use super::SharedQueue;
use crate::{
    common::{Outcome, WorkToken},
    target::Target,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Worker task draining the shared work queue.
///
/// For every token taken off the queue, exactly one [`Outcome`] is sent to
/// `results`, whether the request succeeded, failed, or was cancelled. The
/// loop exits once the queue is closed and empty, or if the aggregator has
/// gone away.
///
/// # Arguments
///
/// - `worker_id`: Index of this worker (used for logs/tracing).
/// - `target`: Shared request target.
/// - `queue`: Work queue receiver shared with the other workers.
/// - `results`: This worker's handle on the results queue.
/// - `cancel`: Run-wide cancellation. Once triggered, in-flight requests are
///   abandoned and remaining tokens are recorded as [`Outcome::Failed`]
///   without touching the network.
///
/// Returns the number of tokens this worker consumed.
pub async fn worker_loop<T: Target>(
    worker_id: usize,
    target: Arc<T>,
    queue: SharedQueue,
    results: mpsc::Sender<Outcome>,
    cancel: CancellationToken,
) -> usize {
    tracing::trace!("Worker {worker_id} started");
    let mut processed = 0;

    while let Some(token) = next_token(&queue).await {
        processed += 1;
        let outcome = attempt(target.as_ref(), &cancel).await;
        tracing::trace!(worker_id, token = token.index(), ?outcome, "Request finished");

        if results.send(outcome).await.is_err() {
            tracing::debug!("Worker {worker_id} exiting: results queue closed");
            break;
        }
    }

    tracing::trace!("Worker {worker_id} stopped after {processed} requests");
    processed
}

async fn next_token(queue: &SharedQueue) -> Option<WorkToken> {
    queue.lock().await.recv().await
}

async fn attempt<T: Target>(target: &T, cancel: &CancellationToken) -> Outcome {
    if cancel.is_cancelled() {
        return Outcome::Failed;
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Outcome::Failed,
        outcome = target.fetch() => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    struct Counting {
        calls: AtomicUsize,
    }

    impl Target for Counting {
        async fn fetch(&self) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Outcome::Status(204)
        }
    }

    struct Hanging;

    impl Target for Hanging {
        async fn fetch(&self) -> Outcome {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Outcome::Status(200)
        }
    }

    fn queue_with(tokens: usize) -> SharedQueue {
        let (tx, rx) = mpsc::channel(tokens.max(1));
        for i in 0..tokens {
            tx.try_send(WorkToken(i)).unwrap();
        }
        Arc::new(Mutex::new(rx))
    }

    #[tokio::test]
    async fn emits_one_outcome_per_token_and_stops_when_drained() {
        let target = Arc::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let (tx, mut rx) = mpsc::channel(8);

        let processed = worker_loop(
            0,
            Arc::clone(&target),
            queue_with(3),
            tx,
            CancellationToken::new(),
        )
        .await;

        assert_eq!(processed, 3);
        assert_eq!(target.calls.load(Ordering::SeqCst), 3);
        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(Outcome::Status(204)));
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn cancelled_run_records_failures_without_fetching() {
        let target = Arc::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (tx, mut rx) = mpsc::channel(8);

        let processed = worker_loop(0, Arc::clone(&target), queue_with(4), tx, cancel).await;

        assert_eq!(processed, 4);
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);
        for _ in 0..4 {
            assert_eq!(rx.recv().await, Some(Outcome::Failed));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_an_in_flight_request() {
        let cancel = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel(2);

        let worker = tokio::spawn(worker_loop(
            0,
            Arc::new(Hanging),
            queue_with(2),
            tx,
            cancel.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();

        assert_eq!(worker.await.unwrap(), 2);
        assert_eq!(rx.recv().await, Some(Outcome::Failed));
        assert_eq!(rx.recv().await, Some(Outcome::Failed));
    }
}

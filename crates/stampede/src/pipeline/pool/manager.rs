//! Spawning and joining of the worker pool.
//!
//! [`WorkerPool`] starts a fixed number of Tokio tasks, all pulling from the
//! same work queue. Each worker owns a clone of the results sender and the
//! pool never keeps one for itself, so the results queue closes exactly when
//! the last worker exits.

use super::{SharedQueue, worker::worker_loop};
use crate::{
    common::{Error, Outcome, Result, WorkToken},
    target::Target,
};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

/// A fixed-size set of running workers.
pub struct WorkerPool {
    workers: Vec<JoinHandle<usize>>,
}

impl WorkerPool {
    /// Spawns `concurrency` workers sharing `work_rx`.
    ///
    /// `results_tx` is moved in and cloned once per worker; the original is
    /// dropped before this returns. Cancelling `cancel` makes workers account
    /// every remaining token as [`Outcome::Failed`] without sending it.
    pub fn spawn<T: Target>(
        concurrency: usize,
        target: Arc<T>,
        work_rx: mpsc::Receiver<WorkToken>,
        results_tx: mpsc::Sender<Outcome>,
        cancel: CancellationToken,
    ) -> Self {
        let queue: SharedQueue = Arc::new(Mutex::new(work_rx));
        let mut workers = Vec::with_capacity(concurrency);

        for worker_id in 0..concurrency {
            workers.push(tokio::spawn(worker_loop(
                worker_id,
                Arc::clone(&target),
                Arc::clone(&queue),
                results_tx.clone(),
                cancel.clone(),
            )));
        }

        tracing::debug!("Spawned {concurrency} workers");
        Self { workers }
    }

    /// Waits for every worker to exit and returns the number of tokens they
    /// processed in total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerPanicked`] for the first worker that panicked or
    /// was aborted. All workers are awaited regardless.
    pub async fn join(self) -> Result<usize> {
        let results = futures::future::join_all(self.workers).await;

        let mut processed = 0;
        let mut first_err = None;
        for (worker_id, result) in results.into_iter().enumerate() {
            match result {
                Ok(count) => processed += count,
                Err(_e) => {
                    tracing::error!("Worker {worker_id} terminated abnormally: {_e}");
                    first_err.get_or_insert(Error::WorkerPanicked { worker_id });
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(processed),
        }
    }
}

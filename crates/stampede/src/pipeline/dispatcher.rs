use crate::common::{Error, Result, WorkToken};
use tokio::sync::mpsc;

/// Emits exactly `total` work tokens, in order `0..total`, then closes the
/// queue by dropping the sender.
///
/// The queue is sized to hold every token, so this never waits on workers.
///
/// # Errors
///
/// Returns [`Error::ChannelError`] if every receiver is gone before the last
/// token is sent, which only happens if the worker pool died.
pub async fn dispatch(total: usize, tx: mpsc::Sender<WorkToken>) -> Result<usize> {
    for index in 0..total {
        if tx.send(WorkToken(index)).await.is_err() {
            return Err(Error::ChannelError {
                context: format!("Work queue closed after {index} of {total} tokens"),
            });
        }
    }

    tracing::debug!("Dispatched {total} work tokens");
    Ok(total)
}

//! Coalescing debounce for raw query input.

use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Re-armable timer that forwards only the last query of a quiet window.
///
/// Due queries are delivered on the receiver returned by [`SearchDebouncer::new`].
/// Re-arming aborts the pending timer only; whatever was already delivered is
/// out of its reach.
pub struct SearchDebouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
    due_tx: mpsc::UnboundedSender<String>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (due_tx, due_rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            pending: Mutex::new(None),
            due_tx,
        };
        (debouncer, due_rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)arm the timer for `query`.
    pub async fn schedule(&self, query: String) {
        let mut pending = self.pending.lock().await;
        if let Some(existing) = pending.take() {
            existing.abort();
        }

        let due_tx = self.due_tx.clone();
        let delay = self.delay;
        // Deadline is taken now, not when the task first runs.
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            if due_tx.send(query).is_err() {
                debug!("search receiver dropped, discarding due query");
            }
        });

        *pending = Some(handle.abort_handle());
        debug!(delay_ms = delay.as_millis() as u64, "search debounce armed");
    }
}

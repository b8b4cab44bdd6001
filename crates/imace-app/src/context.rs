use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use imace_core::ViewState;

/// Shared view context: the store state, its dispatch lock and the change
/// feed the presentation layer subscribes to.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for one transition only, never across a network call.
/// - `state`: used for both reading (`get_state`) and writing (during dispatch).
pub struct ViewContext {
    state: Arc<Mutex<ViewState>>,
    dispatch_lock: Arc<Mutex<()>>,
    changes: watch::Sender<ViewState>,
}

impl ViewContext {
    pub fn new(initial_state: ViewState) -> Self {
        let (changes, _) = watch::channel(initial_state.clone());
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
            changes,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Snapshot of the current state. Does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Serializes transitions. The guard must be dropped before any I/O.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Replace the state and notify subscribers if it changed.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: ViewState) {
        let mut guard = self.state.lock().await;
        *guard = state.clone();
        self.changes.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });
    }

    /// Receiver that observes every committed state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.changes.subscribe()
    }
}

use std::sync::Arc;

use tracing::{error, info};

use imace_core::ports::ImageIndexPort;
use imace_core::{StoreOutcome, ViewEvent};

use crate::dispatcher::DispatchTrace;

/// Result of `handle_delete`, resolved from the dispatch trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// A delete was already outstanding.
    Skipped,
    /// The request failed; local state is untouched.
    Failed,
}

impl DeleteOutcome {
    pub(crate) fn from_trace(trace: &DispatchTrace) -> Self {
        if trace.outcome_of("delete_requested") != Some(StoreOutcome::Applied) {
            return DeleteOutcome::Skipped;
        }
        if trace.applied("delete_succeeded") {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Failed
        }
    }
}

/// Irreversibly removes every image from the index.
pub struct DeleteAllImages {
    index: Arc<dyn ImageIndexPort>,
}

impl DeleteAllImages {
    pub fn from_ports(index: Arc<dyn ImageIndexPort>) -> Self {
        Self { index }
    }

    #[tracing::instrument(name = "usecase.delete_all_images.execute", skip(self))]
    pub async fn execute(&self) -> ViewEvent {
        match self.index.delete_all().await {
            Ok(()) => {
                info!("index emptied");
                ViewEvent::DeleteSucceeded
            }
            Err(err) => {
                error!(error = %err, "delete all failed");
                ViewEvent::DeleteFailed
            }
        }
    }
}

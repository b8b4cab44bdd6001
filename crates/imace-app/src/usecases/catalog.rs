use std::sync::Arc;

use tracing::{debug, warn};

use imace_core::ports::ImageIndexPort;
use imace_core::{RequestTag, ViewEvent};

/// Fetches the unpaginated list of every indexed path.
pub struct RefreshCatalog {
    index: Arc<dyn ImageIndexPort>,
}

impl RefreshCatalog {
    pub fn from_ports(index: Arc<dyn ImageIndexPort>) -> Self {
        Self { index }
    }

    #[tracing::instrument(name = "usecase.refresh_catalog.execute", skip(self), fields(tag = %tag))]
    pub async fn execute(&self, tag: RequestTag) -> ViewEvent {
        match self.index.list_all().await {
            Ok(paths) => {
                debug!(count = paths.len(), "catalog loaded");
                ViewEvent::CatalogLoaded { tag, paths }
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                ViewEvent::CatalogFailed { tag }
            }
        }
    }
}

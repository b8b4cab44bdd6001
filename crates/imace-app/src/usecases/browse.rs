use std::sync::Arc;

use tracing::{debug, warn};

use imace_core::ports::ImageIndexPort;
use imace_core::{BrowseKey, RequestTag, ViewEvent};

/// Fetches one browse page.
pub struct FetchBrowsePage {
    index: Arc<dyn ImageIndexPort>,
}

impl FetchBrowsePage {
    pub fn from_ports(index: Arc<dyn ImageIndexPort>) -> Self {
        Self { index }
    }

    #[tracing::instrument(
        name = "usecase.fetch_browse_page.execute",
        skip(self),
        fields(tag = %tag, page = key.page, page_size = key.page_size.get())
    )]
    pub async fn execute(&self, tag: RequestTag, key: BrowseKey) -> ViewEvent {
        match self.index.list_page(key).await {
            Ok(page) => {
                debug!(items = page.items().len(), total = page.total(), "browse page loaded");
                ViewEvent::BrowseLoaded { tag, page }
            }
            Err(err) => {
                warn!(error = %err, "browse fetch failed");
                ViewEvent::BrowseFailed { tag, key }
            }
        }
    }
}

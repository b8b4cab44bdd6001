use std::sync::Arc;

use tracing::{info, warn};

use imace_core::ports::ImageIndexPort;
use imace_core::{RequestTag, ViewEvent};

/// Sends one text search and reports its completion.
pub struct RunSearch {
    index: Arc<dyn ImageIndexPort>,
}

impl RunSearch {
    pub fn from_ports(index: Arc<dyn ImageIndexPort>) -> Self {
        Self { index }
    }

    #[tracing::instrument(
        name = "usecase.run_search.execute",
        skip(self),
        fields(tag = %tag)
    )]
    pub async fn execute(&self, tag: RequestTag, query: String) -> ViewEvent {
        match self.index.search(&query).await {
            Ok(results) => {
                info!(hits = results.len(), "search completed");
                ViewEvent::SearchSucceeded {
                    tag,
                    query,
                    results,
                }
            }
            Err(err) => {
                warn!(error = %err, "search failed, keeping previous results");
                ViewEvent::SearchFailed { tag, query }
            }
        }
    }
}

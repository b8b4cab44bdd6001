use std::sync::Arc;

use tracing::{debug, warn};

use imace_core::ports::ImageIndexPort;
use imace_core::{RequestTag, ViewEvent};

/// Fetches embedding positions for the 3D view.
pub struct RefreshImagePoints {
    index: Arc<dyn ImageIndexPort>,
}

impl RefreshImagePoints {
    pub fn from_ports(index: Arc<dyn ImageIndexPort>) -> Self {
        Self { index }
    }

    #[tracing::instrument(name = "usecase.refresh_image_points.execute", skip(self), fields(tag = %tag))]
    pub async fn execute(&self, tag: RequestTag) -> ViewEvent {
        match self.index.image_points().await {
            Ok(points) => {
                debug!(count = points.len(), "image points loaded");
                ViewEvent::PointsLoaded { tag, points }
            }
            Err(err) => {
                warn!(error = %err, "image points fetch failed, keeping previous points");
                ViewEvent::PointsFailed { tag }
            }
        }
    }
}

use crate::image::{BrowseKey, BrowsePage, ImagePath, ImagePoint, SearchResultItem};
use crate::staging::StagedFile;

use super::errors::IndexError;

/// The remote image index, one method per HTTP operation.
///
/// Implementations are stateless: no retries, no caching, no cancellation.
#[async_trait::async_trait]
pub trait ImageIndexPort: Send + Sync {
    /// One page of the unfiltered listing.
    async fn list_page(&self, key: BrowseKey) -> Result<BrowsePage, IndexError>;

    /// Ranked text search. Server order is preserved.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, IndexError>;

    /// Upload every file in a single multipart request.
    async fn upload(&self, files: &[StagedFile]) -> Result<(), IndexError>;

    /// Irreversibly delete every indexed image.
    async fn delete_all(&self) -> Result<(), IndexError>;

    /// The unpaginated list of indexed paths.
    async fn list_all(&self) -> Result<Vec<ImagePath>, IndexError>;

    /// Reduced embedding positions with thumbnails.
    async fn image_points(&self) -> Result<Vec<ImagePoint>, IndexError>;

    /// URL the presentation layer fetches the image bytes from.
    fn image_url(&self, path: &ImagePath) -> String;
}

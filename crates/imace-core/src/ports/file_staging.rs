use std::path::Path;

use crate::staging::StagedFile;

use super::errors::StagingError;

/// Loads user-selected local files into memory ahead of an upload.
#[async_trait::async_trait]
pub trait FileStagingPort: Send + Sync {
    async fn load(&self, path: &Path) -> Result<StagedFile, StagingError>;
}

use std::path::Path;

use reqwest::Url;
use tracing::debug;

use imace_core::ports::{FileStagingPort, StagingError};
use imace_core::{PreviewRef, StagedFile};

/// Loads staged files from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileStager;

impl FsFileStager {
    pub fn new() -> Self {
        Self
    }
}

/// MIME type for common image extensions, `None` when unknown.
pub fn guess_image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    let mime_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime_type)
}

#[async_trait::async_trait]
impl FileStagingPort for FsFileStager {
    async fn load(&self, path: &Path) -> Result<StagedFile, StagingError> {
        let read_error = |source| StagingError::Read {
            path: path.to_path_buf(),
            source,
        };

        let absolute = tokio::fs::canonicalize(path).await.map_err(read_error)?;
        let metadata = tokio::fs::metadata(&absolute).await.map_err(read_error)?;
        if !metadata.is_file() {
            return Err(StagingError::NotAFile(path.to_path_buf()));
        }
        let bytes = tokio::fs::read(&absolute).await.map_err(read_error)?;

        let file_name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| absolute.display().to_string());
        let preview = Url::from_file_path(&absolute)
            .map(String::from)
            .unwrap_or_else(|_| format!("file://{}", absolute.display()));

        debug!(path = %absolute.display(), size = bytes.len(), "file staged");
        Ok(StagedFile::new(
            file_name,
            guess_image_mime_type(&absolute).map(str::to_string),
            bytes,
            PreviewRef::new(preview),
        ))
    }
}

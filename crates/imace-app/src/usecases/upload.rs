use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use imace_core::ports::{FileStagingPort, ImageIndexPort};
use imace_core::{StagedFile, StoreOutcome, ViewEvent};

use crate::dispatcher::DispatchTrace;

/// Result of `handle_upload`, resolved from the dispatch trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server accepted every staged file.
    Uploaded,
    /// Rejected up front: an upload is outstanding or nothing is staged.
    Skipped,
    /// The request failed; staged files are kept.
    Failed,
}

impl UploadOutcome {
    pub(crate) fn from_trace(trace: &DispatchTrace) -> Self {
        if trace.outcome_of("upload_requested") != Some(StoreOutcome::Applied) {
            return UploadOutcome::Skipped;
        }
        if trace.applied("upload_succeeded") {
            UploadOutcome::Uploaded
        } else {
            UploadOutcome::Failed
        }
    }
}

/// Sends every staged file in one batched request.
pub struct UploadStagedFiles {
    index: Arc<dyn ImageIndexPort>,
}

impl UploadStagedFiles {
    pub fn from_ports(index: Arc<dyn ImageIndexPort>) -> Self {
        Self { index }
    }

    #[tracing::instrument(
        name = "usecase.upload_staged_files.execute",
        skip(self, files),
        fields(files = files.len())
    )]
    pub async fn execute(&self, files: Vec<StagedFile>) -> ViewEvent {
        let bytes: usize = files.iter().map(StagedFile::size).sum();
        match self.index.upload(&files).await {
            Ok(()) => {
                info!(bytes, "upload accepted");
                ViewEvent::UploadSucceeded
            }
            Err(err) => {
                warn!(error = %err, "upload failed, keeping staged files");
                ViewEvent::UploadFailed
            }
        }
    }
}

/// How many of the selected paths made it into staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageOutcome {
    pub staged: usize,
    pub skipped: usize,
}

/// Loads user-selected files into memory. No network.
pub struct StageFiles {
    staging: Arc<dyn FileStagingPort>,
}

impl StageFiles {
    pub fn from_ports(staging: Arc<dyn FileStagingPort>) -> Self {
        Self { staging }
    }

    /// Load every path; unreadable ones are logged and left out.
    #[tracing::instrument(name = "usecase.stage_files.execute", skip(self, paths), fields(paths = paths.len()))]
    pub async fn execute(&self, paths: &[PathBuf]) -> (Vec<StagedFile>, StageOutcome) {
        let loaded = join_all(paths.iter().map(|path| self.staging.load(path))).await;

        let mut files = Vec::with_capacity(loaded.len());
        let mut outcome = StageOutcome::default();
        for (path, result) in paths.iter().zip(loaded) {
            match result {
                Ok(file) => {
                    files.push(file);
                    outcome.staged += 1;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping file that could not be staged");
                    outcome.skipped += 1;
                }
            }
        }
        (files, outcome)
    }
}

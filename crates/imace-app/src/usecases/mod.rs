//! Use cases performing one side-effect each.
//!
//! Every request use case turns its port result into the completion event
//! the store expects; errors are logged here and never travel further.

pub mod browse;
pub mod catalog;
pub mod delete;
pub mod search;
pub mod spatial;
pub mod upload;

pub use browse::FetchBrowsePage;
pub use catalog::RefreshCatalog;
pub use delete::{DeleteAllImages, DeleteOutcome};
pub use search::RunSearch;
pub use spatial::RefreshImagePoints;
pub use upload::{StageFiles, StageOutcome, UploadOutcome, UploadStagedFiles};

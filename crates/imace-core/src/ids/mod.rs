//! ID type wrappers for type safety.

pub mod request_tag;
pub mod staged_file_id;

pub use request_tag::{RequestTag, RequestTracker};
pub use staged_file_id::StagedFileId;

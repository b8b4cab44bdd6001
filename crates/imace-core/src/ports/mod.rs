//! Port interfaces for the application layer
//!
//! Ports define the contract between the orchestration code in `imace-app`
//! and the adapters in `imace-infra`. The core never talks to the network or
//! the file system itself.

pub mod errors;
pub mod file_staging;
pub mod image_index;

pub use errors::{IndexError, StagingError};
pub use file_staging::FileStagingPort;
pub use image_index::ImageIndexPort;

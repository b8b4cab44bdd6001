//! # Application Dependencies
//!
//! Parameter grouping for [`ImaceApp`](crate::ImaceApp) construction.
//! Not a builder: no build steps, no defaults, no hidden logic.

use std::sync::Arc;

use imace_core::ports::{FileStagingPort, ImageIndexPort};

/// All dependencies are required.
pub struct AppDeps {
    /// Remote image index
    pub index: Arc<dyn ImageIndexPort>,

    /// Local file loading for the upload staging area
    pub staging: Arc<dyn FileStagingPort>,
}

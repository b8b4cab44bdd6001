//! Image index domain models.
//!
//! Everything here is produced by the remote index and only ever replaced
//! wholesale by a newer response.

pub mod browse;
pub mod data_url;
pub mod models;
pub mod points;

pub use browse::{BrowseKey, BrowsePage, InvalidPageSize, PageSize};
pub use data_url::{DataUrl, DataUrlError};
pub use models::{ImagePath, SearchResultItem};
pub use points::ImagePoint;

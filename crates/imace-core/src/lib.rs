//! # imace-core
//!
//! Core domain models and view-state logic for the Imace image index client.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! the store transitions, the view selector and the ports that adapters
//! implement. Nothing in here performs I/O.

// Public module exports
pub mod config;
pub mod ids;
pub mod image;
pub mod ports;
pub mod staging;
pub mod view;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::{RequestTag, StagedFileId};
pub use image::{BrowseKey, BrowsePage, ImagePath, ImagePoint, PageSize, SearchResultItem};
pub use staging::{PreviewRef, StagedFile};
pub use view::{
    select, BusyFlags, StoreOutcome, Transition, ViewEffect, ViewEvent, ViewMode, ViewSelection,
    ViewState, ViewStateMachine,
};

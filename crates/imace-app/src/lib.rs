//! Imace application orchestration layer
//!
//! Owns the view store at runtime: serializes transitions, debounces search
//! input, runs the request use cases and publishes every committed state.

pub mod app;
pub mod context;
pub mod debounce;
pub mod deps;
pub mod dispatcher;
pub mod usecases;

pub use app::ImaceApp;
pub use context::ViewContext;
pub use deps::AppDeps;
pub use dispatcher::{DispatchStep, DispatchTrace, ViewDispatcher};
pub use usecases::{DeleteOutcome, StageOutcome, UploadOutcome};

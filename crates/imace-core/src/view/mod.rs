//! View state: the store, its transitions and the derived view.

pub mod pagination;
pub mod selector;
pub mod state;
pub mod state_machine;

pub use pagination::{page_links, PageLink};
pub use selector::{select, ViewMode, ViewSelection};
pub use state::{BrowseState, BusyFlags, ViewState};
pub use state_machine::{StoreOutcome, Transition, ViewEffect, ViewEvent, ViewStateMachine};

use serde::Serialize;

use crate::image::{ImagePath, PageSize, SearchResultItem};

use super::pagination::{page_links, PageLink};
use super::state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Search,
    Browse,
}

/// What the presentation layer should render, borrowed from the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewSelection<'a> {
    Search {
        items: &'a [SearchResultItem],
        total: usize,
    },
    Browse {
        items: &'a [ImagePath],
        total: u64,
        page: u32,
        page_size: PageSize,
        total_pages: u32,
        /// No page for the current parameters has arrived yet.
        loading: bool,
    },
}

impl ViewSelection<'_> {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewSelection::Search { .. } => ViewMode::Search,
            ViewSelection::Browse { .. } => ViewMode::Browse,
        }
    }

    /// Pagination bar entries. Search mode never paginates.
    pub fn page_links(&self) -> Vec<PageLink> {
        match self {
            ViewSelection::Search { .. } => Vec::new(),
            ViewSelection::Browse {
                page, total_pages, ..
            } => page_links(*page, *total_pages),
        }
    }
}

/// Derive the view to render from the state.
pub fn select(state: &ViewState) -> ViewSelection<'_> {
    if state.is_search_mode() {
        let items = state.search_results();
        return ViewSelection::Search {
            items,
            total: items.len(),
        };
    }

    let browse = state.browse();
    let key = browse.key();
    match browse.current_page() {
        Some(page) => ViewSelection::Browse {
            items: page.items(),
            total: page.total(),
            page: key.page,
            page_size: key.page_size,
            total_pages: page.total_pages(),
            loading: false,
        },
        None => ViewSelection::Browse {
            items: &[],
            total: 0,
            page: key.page,
            page_size: key.page_size,
            total_pages: 0,
            loading: browse.is_fetching(),
        },
    }
}

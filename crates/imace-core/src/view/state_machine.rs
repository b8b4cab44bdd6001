//! View-state machine.
//!
//! Defines a pure transition function over [`ViewState`]. Every named store
//! action is a [`ViewEvent`]; every piece of I/O it asks for is returned as a
//! [`ViewEffect`] for the orchestrator to perform.

use crate::ids::{RequestTag, StagedFileId};
use crate::image::{BrowseKey, BrowsePage, ImagePath, ImagePoint, PageSize, SearchResultItem};
use crate::staging::StagedFile;

use super::state::ViewState;

/// Events that drive the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Raw query input changed.
    QueryChanged { query: String },
    /// Debounce window for `query` elapsed.
    SearchDue { query: String },
    /// Search response (network callback).
    SearchSucceeded {
        tag: RequestTag,
        query: String,
        results: Vec<SearchResultItem>,
    },
    /// Search request failed (network callback).
    SearchFailed { tag: RequestTag, query: String },

    /// User picked a browse page.
    PageSelected { page: u32 },
    /// User picked a page size; resets to the first page.
    PageSizeSelected { page_size: PageSize },
    /// Re-fetch browse data for the current parameters.
    BrowseRefreshRequested,
    BrowseLoaded { tag: RequestTag, page: BrowsePage },
    BrowseFailed { tag: RequestTag, key: BrowseKey },

    /// Replace the staging set with freshly selected files.
    FilesStaged { files: Vec<StagedFile> },
    /// Cancel the staged file at `index`.
    FileUnstaged { index: usize },
    UploadRequested,
    UploadSucceeded,
    UploadFailed,

    DeleteRequested,
    DeleteSucceeded,
    DeleteFailed,

    PointsRequested,
    PointsLoaded {
        tag: RequestTag,
        points: Vec<ImagePoint>,
    },
    PointsFailed { tag: RequestTag },

    CatalogRequested,
    CatalogLoaded {
        tag: RequestTag,
        paths: Vec<ImagePath>,
    },
    CatalogFailed { tag: RequestTag },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::QueryChanged { .. } => "query_changed",
            ViewEvent::SearchDue { .. } => "search_due",
            ViewEvent::SearchSucceeded { .. } => "search_succeeded",
            ViewEvent::SearchFailed { .. } => "search_failed",
            ViewEvent::PageSelected { .. } => "page_selected",
            ViewEvent::PageSizeSelected { .. } => "page_size_selected",
            ViewEvent::BrowseRefreshRequested => "browse_refresh_requested",
            ViewEvent::BrowseLoaded { .. } => "browse_loaded",
            ViewEvent::BrowseFailed { .. } => "browse_failed",
            ViewEvent::FilesStaged { .. } => "files_staged",
            ViewEvent::FileUnstaged { .. } => "file_unstaged",
            ViewEvent::UploadRequested => "upload_requested",
            ViewEvent::UploadSucceeded => "upload_succeeded",
            ViewEvent::UploadFailed => "upload_failed",
            ViewEvent::DeleteRequested => "delete_requested",
            ViewEvent::DeleteSucceeded => "delete_succeeded",
            ViewEvent::DeleteFailed => "delete_failed",
            ViewEvent::PointsRequested => "points_requested",
            ViewEvent::PointsLoaded { .. } => "points_loaded",
            ViewEvent::PointsFailed { .. } => "points_failed",
            ViewEvent::CatalogRequested => "catalog_requested",
            ViewEvent::CatalogLoaded { .. } => "catalog_loaded",
            ViewEvent::CatalogFailed { .. } => "catalog_failed",
        }
    }
}

/// Side-effects produced by transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    /// (Re)arm the debounce timer for `query`.
    ScheduleSearch { query: String },
    IssueSearch { tag: RequestTag, query: String },
    FetchBrowsePage { tag: RequestTag, key: BrowseKey },
    /// One batched upload of every listed file.
    UploadFiles { files: Vec<StagedFile> },
    DeleteAll,
    FetchImagePoints { tag: RequestTag },
    FetchCatalog { tag: RequestTag },
}

/// How the store treated an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// State changed or effects were emitted.
    Applied,
    /// A response that a newer request superseded; discarded.
    Stale,
    /// Rejected by a guard (busy flag, out-of-range index, no-op change).
    Ignored,
}

#[derive(Debug)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<ViewEffect>,
    pub outcome: StoreOutcome,
}

/// Pure view-state machine: no side effects.
pub struct ViewStateMachine;

impl ViewStateMachine {
    pub fn transition(state: ViewState, event: ViewEvent) -> Transition {
        let mut state = state;
        let mut effects = Vec::new();

        let outcome = match event {
            ViewEvent::QueryChanged { query } => {
                state.search_query = query.clone();
                effects.push(ViewEffect::ScheduleSearch { query });
                StoreOutcome::Applied
            }
            ViewEvent::SearchDue { query } => {
                if query != state.search_query {
                    StoreOutcome::Stale
                } else if query.is_empty() {
                    let was_search = state.is_search_mode();
                    state.search_results.clear();
                    state.search_tracker.supersede();
                    Self::ensure_browse(&mut state, &mut effects, was_search);
                    StoreOutcome::Applied
                } else {
                    let tag = state.search_tracker.issue();
                    effects.push(ViewEffect::IssueSearch { tag, query });
                    StoreOutcome::Applied
                }
            }
            ViewEvent::SearchSucceeded {
                tag,
                query,
                results,
            } => {
                // Settling first keeps `is_searching` tied to the latest tag
                // even when the query moved on since it was issued.
                if !state.search_tracker.settle(tag) || query != state.search_query {
                    StoreOutcome::Stale
                } else {
                    let was_search = state.is_search_mode();
                    state.search_results = results;
                    Self::ensure_browse(&mut state, &mut effects, was_search);
                    StoreOutcome::Applied
                }
            }
            ViewEvent::SearchFailed { tag, .. } => {
                if state.search_tracker.settle(tag) {
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Stale
                }
            }
            ViewEvent::PageSelected { page } => {
                let key = BrowseKey::new(page, state.browse.key.page_size);
                if key == state.browse.key {
                    StoreOutcome::Ignored
                } else {
                    state.browse.key = key;
                    Self::ensure_browse(&mut state, &mut effects, false);
                    StoreOutcome::Applied
                }
            }
            ViewEvent::PageSizeSelected { page_size } => {
                if page_size == state.browse.key.page_size {
                    StoreOutcome::Ignored
                } else {
                    state.browse.key = BrowseKey::first(page_size);
                    Self::ensure_browse(&mut state, &mut effects, false);
                    StoreOutcome::Applied
                }
            }
            ViewEvent::BrowseRefreshRequested => {
                Self::refresh_browse(&mut state, &mut effects);
                StoreOutcome::Applied
            }
            ViewEvent::BrowseLoaded { tag, page } => {
                if !state.browse.tracker.settle(tag) {
                    StoreOutcome::Stale
                } else {
                    state.browse.pending = None;
                    state.browse.loaded = Some(page);
                    // Parameters may have moved while in search mode.
                    Self::ensure_browse(&mut state, &mut effects, false);
                    StoreOutcome::Applied
                }
            }
            ViewEvent::BrowseFailed { tag, .. } => {
                if state.browse.tracker.settle(tag) {
                    state.browse.pending = None;
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Stale
                }
            }
            ViewEvent::FilesStaged { files } => {
                state.staged_files = files;
                StoreOutcome::Applied
            }
            ViewEvent::FileUnstaged { index } => {
                if index < state.staged_files.len() {
                    state.staged_files.remove(index);
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Ignored
                }
            }
            ViewEvent::UploadRequested => {
                if state.uploading.is_some() || state.staged_files.is_empty() {
                    StoreOutcome::Ignored
                } else {
                    let ids: Vec<StagedFileId> =
                        state.staged_files.iter().map(|f| f.id.clone()).collect();
                    state.uploading = Some(ids);
                    effects.push(ViewEffect::UploadFiles {
                        files: state.staged_files.clone(),
                    });
                    StoreOutcome::Applied
                }
            }
            ViewEvent::UploadSucceeded => match state.uploading.take() {
                None => StoreOutcome::Ignored,
                Some(uploaded) => {
                    // Files staged while the upload was in flight stay staged.
                    state.staged_files.retain(|f| !uploaded.contains(&f.id));
                    Self::refresh_browse(&mut state, &mut effects);
                    if state.catalog.is_some() {
                        let tag = state.catalog_tracker.issue();
                        effects.push(ViewEffect::FetchCatalog { tag });
                    }
                    if state.image_points.is_some() {
                        let tag = state.points_tracker.issue();
                        effects.push(ViewEffect::FetchImagePoints { tag });
                    }
                    StoreOutcome::Applied
                }
            },
            ViewEvent::UploadFailed => match state.uploading.take() {
                None => StoreOutcome::Ignored,
                Some(_) => StoreOutcome::Applied,
            },
            ViewEvent::DeleteRequested => {
                if state.deleting {
                    StoreOutcome::Ignored
                } else {
                    state.deleting = true;
                    effects.push(ViewEffect::DeleteAll);
                    StoreOutcome::Applied
                }
            }
            ViewEvent::DeleteSucceeded => {
                if !state.deleting {
                    StoreOutcome::Ignored
                } else {
                    state.deleting = false;
                    Self::clear_image_state(&mut state);
                    Self::ensure_browse(&mut state, &mut effects, false);
                    StoreOutcome::Applied
                }
            }
            ViewEvent::DeleteFailed => {
                if state.deleting {
                    state.deleting = false;
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Ignored
                }
            }
            ViewEvent::PointsRequested => {
                let tag = state.points_tracker.issue();
                effects.push(ViewEffect::FetchImagePoints { tag });
                StoreOutcome::Applied
            }
            ViewEvent::PointsLoaded { tag, points } => {
                if state.points_tracker.settle(tag) {
                    state.image_points = Some(points);
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Stale
                }
            }
            ViewEvent::PointsFailed { tag } => {
                if state.points_tracker.settle(tag) {
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Stale
                }
            }
            ViewEvent::CatalogRequested => {
                let tag = state.catalog_tracker.issue();
                effects.push(ViewEffect::FetchCatalog { tag });
                StoreOutcome::Applied
            }
            ViewEvent::CatalogLoaded { tag, paths } => {
                if state.catalog_tracker.settle(tag) {
                    state.catalog = Some(paths);
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Stale
                }
            }
            ViewEvent::CatalogFailed { tag } => {
                if state.catalog_tracker.settle(tag) {
                    StoreOutcome::Applied
                } else {
                    StoreOutcome::Stale
                }
            }
        };

        Transition {
            state,
            effects,
            outcome,
        }
    }

    /// Request browse data when browse mode is active and the current
    /// parameters have neither a loaded page nor a request in flight.
    fn ensure_browse(state: &mut ViewState, effects: &mut Vec<ViewEffect>, force: bool) {
        if state.is_search_mode() {
            return;
        }
        let key = state.browse.key;
        if !force {
            if state.browse.current_page().is_some() {
                return;
            }
            if state.browse.tracker.in_flight() && state.browse.pending == Some(key) {
                return;
            }
        }
        let tag = state.browse.tracker.issue();
        state.browse.pending = Some(key);
        effects.push(ViewEffect::FetchBrowsePage { tag, key });
    }

    /// Server-side data changed: fetch now in browse mode, otherwise drop
    /// the cached page so browse mode fetches it lazily.
    fn refresh_browse(state: &mut ViewState, effects: &mut Vec<ViewEffect>) {
        if state.is_search_mode() {
            state.browse.loaded = None;
        } else {
            Self::ensure_browse(state, effects, true);
        }
    }

    /// Server-side data is gone. The query text is kept.
    fn clear_image_state(state: &mut ViewState) {
        state.search_results.clear();
        state.search_tracker.supersede();
        state.browse.loaded = None;
        state.browse.pending = None;
        state.browse.tracker.supersede();
        if let Some(catalog) = state.catalog.as_mut() {
            catalog.clear();
        }
        state.catalog_tracker.supersede();
        if let Some(points) = state.image_points.as_mut() {
            points.clear();
        }
        state.points_tracker.supersede();
    }
}

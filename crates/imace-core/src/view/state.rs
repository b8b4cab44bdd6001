use serde::Serialize;

use crate::ids::{RequestTracker, StagedFileId};
use crate::image::{BrowseKey, BrowsePage, ImagePath, ImagePoint, PageSize, SearchResultItem};
use crate::staging::StagedFile;

/// Busy flags, each true exactly while its request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BusyFlags {
    pub is_searching: bool,
    pub is_uploading: bool,
    pub is_deleting: bool,
    pub is_loading_points: bool,
}

/// Browse parameters and the latest page fetched for them.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    pub(crate) key: BrowseKey,
    pub(crate) loaded: Option<BrowsePage>,
    pub(crate) pending: Option<BrowseKey>,
    pub(crate) tracker: RequestTracker,
}

impl BrowseState {
    fn new(page_size: PageSize) -> Self {
        Self {
            key: BrowseKey::first(page_size),
            loaded: None,
            pending: None,
            tracker: RequestTracker::default(),
        }
    }

    pub fn key(&self) -> BrowseKey {
        self.key
    }

    /// The loaded page, only if it answers the current parameters.
    pub fn current_page(&self) -> Option<&BrowsePage> {
        self.loaded.as_ref().filter(|page| page.key() == self.key)
    }

    pub fn is_fetching(&self) -> bool {
        self.tracker.in_flight()
    }
}

/// Session-lifetime view state.
///
/// Fields are only mutated by [`ViewStateMachine`](super::ViewStateMachine);
/// everything else reads through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub(crate) search_query: String,
    pub(crate) search_results: Vec<SearchResultItem>,
    pub(crate) search_tracker: RequestTracker,
    pub(crate) browse: BrowseState,
    pub(crate) staged_files: Vec<StagedFile>,
    /// Ids sent with the outstanding upload, `None` when idle.
    pub(crate) uploading: Option<Vec<StagedFileId>>,
    pub(crate) deleting: bool,
    pub(crate) catalog: Option<Vec<ImagePath>>,
    pub(crate) catalog_tracker: RequestTracker,
    pub(crate) image_points: Option<Vec<ImagePoint>>,
    pub(crate) points_tracker: RequestTracker,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search_query: String::new(),
            search_results: Vec::new(),
            search_tracker: RequestTracker::default(),
            browse: BrowseState::new(page_size),
            staged_files: Vec::new(),
            uploading: None,
            deleting: false,
            catalog: None,
            catalog_tracker: RequestTracker::default(),
            image_points: None,
            points_tracker: RequestTracker::default(),
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_results(&self) -> &[SearchResultItem] {
        &self.search_results
    }

    pub fn browse(&self) -> &BrowseState {
        &self.browse
    }

    pub fn staged_files(&self) -> &[StagedFile] {
        &self.staged_files
    }

    pub fn catalog(&self) -> Option<&[ImagePath]> {
        self.catalog.as_deref()
    }

    pub fn image_points(&self) -> Option<&[ImagePoint]> {
        self.image_points.as_deref()
    }

    /// Search mode is active iff there are search results to show.
    pub fn is_search_mode(&self) -> bool {
        !self.search_results.is_empty()
    }

    pub fn busy(&self) -> BusyFlags {
        BusyFlags {
            is_searching: self.search_tracker.in_flight(),
            is_uploading: self.uploading.is_some(),
            is_deleting: self.deleting,
            is_loading_points: self.points_tracker.in_flight(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

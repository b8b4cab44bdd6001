//! Application facade used by the presentation layer.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use imace_core::ports::ImageIndexPort;
use imace_core::{AppConfig, ImagePath, PageSize, ViewEvent, ViewState};

use crate::context::ViewContext;
use crate::debounce::SearchDebouncer;
use crate::deps::AppDeps;
use crate::dispatcher::{DispatchTrace, ViewDispatcher};
use crate::usecases::{DeleteOutcome, StageFiles, StageOutcome, UploadOutcome};

/// Session-lifetime client: one store, one dispatcher, one debounce timer.
///
/// Every user action awaits its whole request chain; search input is the
/// exception, its request runs on a detached task once the debounce elapses.
pub struct ImaceApp {
    dispatcher: ViewDispatcher,
    debouncer: Arc<SearchDebouncer>,
    stage_files: StageFiles,
    index: Arc<dyn ImageIndexPort>,
    due_rx: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
    search_pump: OnceLock<AbortHandle>,
}

impl ImaceApp {
    pub fn new(deps: AppDeps, config: &AppConfig) -> Self {
        let context = ViewContext::new(ViewState::new(config.default_page_size)).arc();
        let (debouncer, due_rx) =
            SearchDebouncer::new(Duration::from_millis(config.search_debounce_ms));
        let debouncer = Arc::new(debouncer);
        let dispatcher = ViewDispatcher::new(context, debouncer.clone(), deps.index.clone());

        Self {
            dispatcher,
            debouncer,
            stage_files: StageFiles::from_ports(deps.staging),
            index: deps.index,
            due_rx: Mutex::new(Some(due_rx)),
            search_pump: OnceLock::new(),
        }
    }

    /// Start forwarding due searches and load the first browse page.
    ///
    /// Must be called from within a tokio runtime. Calling it again only
    /// refreshes the browse page.
    #[tracing::instrument(name = "app.start", skip(self))]
    pub async fn start(&self) -> DispatchTrace {
        if let Some(mut due_rx) = self.due_rx.lock().await.take() {
            let dispatcher = self.dispatcher.clone();
            let pump = tokio::spawn(async move {
                while let Some(query) = due_rx.recv().await {
                    let dispatcher = dispatcher.clone();
                    // Detached: later input must not cancel an issued request.
                    tokio::spawn(async move {
                        dispatcher.dispatch(ViewEvent::SearchDue { query }).await;
                    });
                }
                debug!("search pump stopped");
            });
            if self.search_pump.set(pump.abort_handle()).is_err() {
                warn!("search pump already registered");
            }
            info!(
                debounce_ms = self.debouncer.delay().as_millis() as u64,
                "imace app started"
            );
        }

        self.dispatcher
            .dispatch(ViewEvent::BrowseRefreshRequested)
            .await
    }

    /// Update the query and (re)arm the debounced search. No I/O here.
    pub async fn set_search_query(&self, query: impl Into<String>) -> DispatchTrace {
        self.dispatcher
            .dispatch(ViewEvent::QueryChanged {
                query: query.into(),
            })
            .await
    }

    pub async fn set_browse_page(&self, page: u32) -> DispatchTrace {
        self.dispatcher
            .dispatch(ViewEvent::PageSelected { page })
            .await
    }

    /// Change the page size; the browse view goes back to page 1.
    pub async fn set_browse_page_size(&self, page_size: PageSize) -> DispatchTrace {
        self.dispatcher
            .dispatch(ViewEvent::PageSizeSelected { page_size })
            .await
    }

    pub async fn refresh_browse(&self) -> DispatchTrace {
        self.dispatcher
            .dispatch(ViewEvent::BrowseRefreshRequested)
            .await
    }

    /// Load `paths` from disk and make them the staging set.
    ///
    /// Unreadable files are skipped. When none of a non-empty selection
    /// loads, the current staging set is kept.
    #[tracing::instrument(name = "app.stage_files", skip(self, paths), fields(paths = paths.len()))]
    pub async fn stage_files(&self, paths: &[PathBuf]) -> StageOutcome {
        let (files, outcome) = self.stage_files.execute(paths).await;
        if files.is_empty() && !paths.is_empty() {
            warn!(skipped = outcome.skipped, "no selected file could be staged");
            return outcome;
        }
        self.dispatcher
            .dispatch(ViewEvent::FilesStaged { files })
            .await;
        outcome
    }

    /// Cancel the staged file at `index`. Returns false if there is none.
    pub async fn unstage_file(&self, index: usize) -> bool {
        self.dispatcher
            .dispatch(ViewEvent::FileUnstaged { index })
            .await
            .applied("file_unstaged")
    }

    #[tracing::instrument(name = "app.handle_upload", skip(self))]
    pub async fn handle_upload(&self) -> UploadOutcome {
        let trace = self.dispatcher.dispatch(ViewEvent::UploadRequested).await;
        UploadOutcome::from_trace(&trace)
    }

    #[tracing::instrument(name = "app.handle_delete", skip(self))]
    pub async fn handle_delete(&self) -> DeleteOutcome {
        let trace = self.dispatcher.dispatch(ViewEvent::DeleteRequested).await;
        DeleteOutcome::from_trace(&trace)
    }

    pub async fn refresh_image_points(&self) -> DispatchTrace {
        self.dispatcher.dispatch(ViewEvent::PointsRequested).await
    }

    pub async fn refresh_catalog(&self) -> DispatchTrace {
        self.dispatcher.dispatch(ViewEvent::CatalogRequested).await
    }

    pub async fn snapshot(&self) -> ViewState {
        self.dispatcher.context().get_state().await
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.dispatcher.context().subscribe()
    }

    pub fn image_url(&self, path: &ImagePath) -> String {
        self.index.image_url(path)
    }
}

impl Drop for ImaceApp {
    fn drop(&mut self) {
        if let Some(pump) = self.search_pump.get() {
            pump.abort();
        }
    }
}

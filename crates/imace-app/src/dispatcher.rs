//! View dispatcher.
//!
//! Runs store transitions one at a time and performs the effects they emit.
//! A transition holds the dispatch lock; effects run after it is released,
//! and their completion events are fed back through the same loop. Debounce
//! re-arming is the exception: it happens before the lock is released.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use imace_core::ports::ImageIndexPort;
use imace_core::{StoreOutcome, Transition, ViewEffect, ViewEvent, ViewStateMachine};

use crate::context::ViewContext;
use crate::debounce::SearchDebouncer;
use crate::usecases::{
    DeleteAllImages, FetchBrowsePage, RefreshCatalog, RefreshImagePoints, RunSearch,
    UploadStagedFiles,
};

/// One transition of a dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStep {
    pub event: &'static str,
    pub outcome: StoreOutcome,
}

/// Every transition run by one `dispatch` call, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTrace {
    steps: Vec<DispatchStep>,
}

impl DispatchTrace {
    pub fn steps(&self) -> &[DispatchStep] {
        &self.steps
    }

    /// Outcome of the first step for `event`.
    pub fn outcome_of(&self, event: &str) -> Option<StoreOutcome> {
        self.steps
            .iter()
            .find(|step| step.event == event)
            .map(|step| step.outcome)
    }

    pub fn applied(&self, event: &str) -> bool {
        self.outcome_of(event) == Some(StoreOutcome::Applied)
    }

    /// Outcome of the event that started the chain.
    pub fn first_outcome(&self) -> Option<StoreOutcome> {
        self.steps.first().map(|step| step.outcome)
    }

    fn record(&mut self, event: &'static str, outcome: StoreOutcome) {
        self.steps.push(DispatchStep { event, outcome });
    }
}

/// Drives [`ViewStateMachine`] and executes its effects.
#[derive(Clone)]
pub struct ViewDispatcher {
    context: Arc<ViewContext>,
    debouncer: Arc<SearchDebouncer>,
    run_search: Arc<RunSearch>,
    fetch_browse_page: Arc<FetchBrowsePage>,
    upload_staged_files: Arc<UploadStagedFiles>,
    delete_all_images: Arc<DeleteAllImages>,
    refresh_image_points: Arc<RefreshImagePoints>,
    refresh_catalog: Arc<RefreshCatalog>,
}

impl ViewDispatcher {
    pub fn new(
        context: Arc<ViewContext>,
        debouncer: Arc<SearchDebouncer>,
        index: Arc<dyn ImageIndexPort>,
    ) -> Self {
        Self {
            context,
            debouncer,
            run_search: Arc::new(RunSearch::from_ports(index.clone())),
            fetch_browse_page: Arc::new(FetchBrowsePage::from_ports(index.clone())),
            upload_staged_files: Arc::new(UploadStagedFiles::from_ports(index.clone())),
            delete_all_images: Arc::new(DeleteAllImages::from_ports(index.clone())),
            refresh_image_points: Arc::new(RefreshImagePoints::from_ports(index.clone())),
            refresh_catalog: Arc::new(RefreshCatalog::from_ports(index)),
        }
    }

    pub fn context(&self) -> &Arc<ViewContext> {
        &self.context
    }

    /// Apply `event` and every completion event its effects produce.
    ///
    /// Returns once the whole chain has settled.
    pub async fn dispatch(&self, event: ViewEvent) -> DispatchTrace {
        let span = info_span!("usecase.view_dispatcher.dispatch", event = event.name());
        async {
            let mut trace = DispatchTrace::default();
            let mut pending = VecDeque::from([event]);

            while let Some(event) = pending.pop_front() {
                let effects = self.transition(event, &mut trace).await;
                for effect in effects {
                    if let Some(follow_up) = self.perform(effect).await {
                        pending.push_back(follow_up);
                    }
                }
            }

            trace
        }
        .instrument(span)
        .await
    }

    /// Run one transition under the dispatch lock and commit its state.
    async fn transition(&self, event: ViewEvent, trace: &mut DispatchTrace) -> Vec<ViewEffect> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let event_name = event.name();
        let current = self.context.get_state().await;
        let Transition {
            state,
            effects,
            outcome,
        } = ViewStateMachine::transition(current, event);

        match outcome {
            StoreOutcome::Applied => {
                debug!(event = event_name, effects = effects.len(), busy = ?state.busy(), "view state transition")
            }
            StoreOutcome::Stale => info!(event = event_name, "discarding superseded response"),
            StoreOutcome::Ignored => info!(event = event_name, "event ignored by store guard"),
        }

        // Stale completions still settle their in-flight flag.
        self.context.set_state(state).await;
        trace.record(event_name, outcome);

        // Re-arm under the lock so timers follow commit order.
        let mut deferred = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                ViewEffect::ScheduleSearch { query } => self.debouncer.schedule(query).await,
                other => deferred.push(other),
            }
        }
        deferred
    }

    async fn perform(&self, effect: ViewEffect) -> Option<ViewEvent> {
        debug!(?effect, "executing view effect");
        match effect {
            ViewEffect::ScheduleSearch { query } => {
                // Normally handled in `transition`.
                self.debouncer.schedule(query).await;
                None
            }
            ViewEffect::IssueSearch { tag, query } => {
                Some(self.run_search.execute(tag, query).await)
            }
            ViewEffect::FetchBrowsePage { tag, key } => {
                Some(self.fetch_browse_page.execute(tag, key).await)
            }
            ViewEffect::UploadFiles { files } => {
                Some(self.upload_staged_files.execute(files).await)
            }
            ViewEffect::DeleteAll => Some(self.delete_all_images.execute().await),
            ViewEffect::FetchImagePoints { tag } => {
                Some(self.refresh_image_points.execute(tag).await)
            }
            ViewEffect::FetchCatalog { tag } => Some(self.refresh_catalog.execute(tag).await),
        }
    }
}

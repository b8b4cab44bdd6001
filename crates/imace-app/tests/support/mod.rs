//! Shared fakes for the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::oneshot;

use imace_app::{AppDeps, ImaceApp};
use imace_core::ports::{FileStagingPort, ImageIndexPort, IndexError, StagingError};
use imace_core::{
    AppConfig, BrowseKey, BrowsePage, ImagePath, ImagePoint, PreviewRef, SearchResultItem,
    StagedFile, ViewState,
};

/// In-memory image index with controllable response timing.
#[derive(Default)]
pub struct FakeIndex {
    total: AtomicU64,
    searches: Mutex<Vec<String>>,
    pages: Mutex<Vec<BrowseKey>>,
    uploads: Mutex<Vec<Vec<String>>>,
    deletes: AtomicUsize,
    canned_results: Mutex<HashMap<String, Vec<SearchResultItem>>>,
    failing_queries: Mutex<HashSet<String>>,
    search_gates: Mutex<HashMap<String, oneshot::Receiver<Vec<SearchResultItem>>>>,
    delete_gate: Mutex<Option<oneshot::Receiver<()>>>,
    points: Mutex<Vec<ImagePoint>>,
}

impl FakeIndex {
    pub fn with_images(total: u64) -> Arc<Self> {
        let index = Self::default();
        index.total.store(total, Ordering::SeqCst);
        Arc::new(index)
    }

    pub fn respond(&self, query: &str, results: Vec<SearchResultItem>) {
        self.canned_results
            .lock()
            .unwrap()
            .insert(query.to_string(), results);
    }

    pub fn fail_query(&self, query: &str) {
        self.failing_queries
            .lock()
            .unwrap()
            .insert(query.to_string());
    }

    /// Hold the response for `query` until the returned sender fires.
    pub fn gate_search(&self, query: &str) -> oneshot::Sender<Vec<SearchResultItem>> {
        let (tx, rx) = oneshot::channel();
        self.search_gates
            .lock()
            .unwrap()
            .insert(query.to_string(), rx);
        tx
    }

    pub fn gate_delete(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.delete_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn set_points(&self, points: Vec<ImagePoint>) {
        *self.points.lock().unwrap() = points;
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn pages(&self) -> Vec<BrowseKey> {
        self.pages.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Vec<String>> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn path(n: u64) -> ImagePath {
        ImagePath::new(format!("images/{n}.jpg"))
    }
}

#[async_trait]
impl ImageIndexPort for FakeIndex {
    async fn list_page(&self, key: BrowseKey) -> Result<BrowsePage, IndexError> {
        self.pages.lock().unwrap().push(key);
        let total = self.total.load(Ordering::SeqCst);
        let start = key.offset().min(total);
        let end = (start + u64::from(key.page_size.get())).min(total);
        let items = (start..end).map(Self::path).collect();
        Ok(BrowsePage::new(key, items, total))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, IndexError> {
        self.searches.lock().unwrap().push(query.to_string());

        let gate = self.search_gates.lock().unwrap().remove(query);
        if let Some(gate) = gate {
            return gate.await.map_err(|_| IndexError::Network {
                endpoint: "/search",
                message: "gate dropped".to_string(),
            });
        }
        if self.failing_queries.lock().unwrap().contains(query) {
            return Err(IndexError::Server {
                endpoint: "/search",
                status: 500,
            });
        }
        Ok(self
            .canned_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn upload(&self, files: &[StagedFile]) -> Result<(), IndexError> {
        self.uploads
            .lock()
            .unwrap()
            .push(files.iter().map(|f| f.file_name.clone()).collect());
        self.total.fetch_add(files.len() as u64, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), IndexError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let gate = self.delete_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.total.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ImagePath>, IndexError> {
        Ok((0..self.total.load(Ordering::SeqCst)).map(Self::path).collect())
    }

    async fn image_points(&self) -> Result<Vec<ImagePoint>, IndexError> {
        Ok(self.points.lock().unwrap().clone())
    }

    fn image_url(&self, path: &ImagePath) -> String {
        format!("http://index.test/image/{path}")
    }
}

/// Stages any path except those whose file name starts with `missing`.
pub struct FakeStager;

#[async_trait]
impl FileStagingPort for FakeStager {
    async fn load(&self, path: &Path) -> Result<StagedFile, StagingError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.starts_with("missing") {
            return Err(StagingError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        Ok(StagedFile::new(
            name,
            Some("image/jpeg".to_string()),
            Bytes::from_static(b"\xFF\xD8\xFF"),
            PreviewRef::new(format!("file://{}", path.display())),
        ))
    }
}

pub fn build_app(index: Arc<dyn ImageIndexPort>) -> ImaceApp {
    let deps = AppDeps {
        index,
        staging: Arc::new(FakeStager),
    };
    ImaceApp::new(deps, &AppConfig::default())
}

pub fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from("/photos").join(n)).collect()
}

/// Wait until a committed state satisfies `predicate`.
pub async fn wait_for_state(
    app: &ImaceApp,
    predicate: impl FnMut(&ViewState) -> bool,
) -> ViewState {
    let mut rx = app.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(30), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("view context dropped")
        .clone();
    state
}

/// Let every runnable task finish. With paused time this returns only once
/// the runtime is idle.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Poll `condition` until it holds.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        settle().await;
    }
    panic!("condition never became true");
}

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

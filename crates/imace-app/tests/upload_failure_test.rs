mod support;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use imace_app::UploadOutcome;
use imace_core::ports::{ImageIndexPort, IndexError};
use imace_core::{BrowseKey, BrowsePage, ImagePath, ImagePoint, SearchResultItem, StagedFile};
use support::{build_app, paths};

mock! {
    pub Index {}

    #[async_trait]
    impl ImageIndexPort for Index {
        async fn list_page(&self, key: BrowseKey) -> Result<BrowsePage, IndexError>;
        async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, IndexError>;
        async fn upload(&self, files: &[StagedFile]) -> Result<(), IndexError>;
        async fn delete_all(&self) -> Result<(), IndexError>;
        async fn list_all(&self) -> Result<Vec<ImagePath>, IndexError>;
        async fn image_points(&self) -> Result<Vec<ImagePoint>, IndexError>;
        fn image_url(&self, path: &ImagePath) -> String;
    }
}

#[tokio::test]
async fn upload_failure_test_server_error_keeps_staged_files() -> anyhow::Result<()> {
    let mut index = MockIndex::new();
    index
        .expect_list_page()
        .times(1)
        .returning(|key| Ok(BrowsePage::empty(key)));
    index
        .expect_upload()
        .withf(|files| files.len() == 2)
        .times(1)
        .returning(|_| {
            Err(IndexError::Server {
                endpoint: "/upload",
                status: 500,
            })
        });

    let app = build_app(Arc::new(index));
    app.start().await;
    app.stage_files(&paths(&["a.jpg", "b.jpg"])).await;

    let outcome = app.handle_upload().await;

    assert_eq!(outcome, UploadOutcome::Failed);
    let state = app.snapshot().await;
    assert_eq!(state.staged_files().len(), 2);
    assert!(!state.busy().is_uploading);
    Ok(())
}

#[tokio::test]
async fn upload_failure_test_failed_browse_fetch_leaves_view_empty() -> anyhow::Result<()> {
    let mut index = MockIndex::new();
    index.expect_list_page().times(1).returning(|_| {
        Err(IndexError::Network {
            endpoint: "/paginated_images",
            message: "connection refused".to_string(),
        })
    });

    let app = build_app(Arc::new(index));
    app.start().await;

    let state = app.snapshot().await;
    assert!(state.browse().current_page().is_none());
    assert!(!state.browse().is_fetching());
    Ok(())
}

#[tokio::test]
async fn upload_failure_test_image_url_comes_from_index() {
    let mut index = MockIndex::new();
    index
        .expect_image_url()
        .returning(|path| format!("http://127.0.0.1:8000/image/{path}"));

    let app = build_app(Arc::new(index));

    assert_eq!(
        app.image_url(&ImagePath::new("cat.jpg")),
        "http://127.0.0.1:8000/image/cat.jpg"
    );
}

mod support;

use imace_core::ImagePoint;
use support::{build_app, FakeIndex};

#[tokio::test]
async fn spatial_view_test_points_are_loaded_with_thumbnails() {
    let index = FakeIndex::with_images(1);
    index.set_points(vec![ImagePoint {
        id: 7,
        position: [0.5, -1.0, 2.25],
        image_data: "data:image/webp;base64,UklGRg==".to_string(),
    }]);
    let app = build_app(index);
    app.start().await;

    let trace = app.refresh_image_points().await;

    assert!(trace.applied("points_loaded"));
    let state = app.snapshot().await;
    let points = state.image_points().expect("points loaded");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].position, [0.5, -1.0, 2.25]);
    let thumbnail = points[0].thumbnail().expect("valid data url");
    assert_eq!(thumbnail.mime_type, "image/webp");
    assert!(!state.busy().is_loading_points);
}

#[tokio::test]
async fn spatial_view_test_catalog_lists_every_image() {
    let index = FakeIndex::with_images(30);
    let app = build_app(index);
    app.start().await;

    app.refresh_catalog().await;

    let state = app.snapshot().await;
    let catalog = state.catalog().expect("catalog loaded");
    assert_eq!(catalog.len(), 30);
    assert_eq!(catalog[29].as_str(), "images/29.jpg");
    // The browse page stays paginated.
    assert_eq!(state.browse().current_page().map(|p| p.items().len()), Some(12));
}

//! # Dependency wiring
//!
//! The only place that knows both `imace-infra` and `imace-app`. It turns a
//! loaded [`AppConfig`] into concrete adapters behind the port traits and
//! hands them to [`ImaceApp`]. No policy is decided here.

use std::sync::Arc;
use std::time::Duration;

use imace_app::{AppDeps, ImaceApp};
use imace_core::config::AppConfig;
use imace_core::ports::IndexError;
use imace_infra::{FsFileStager, HttpImageIndexClient};
use tracing::info;

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors while assembling the adapters
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Image index client initialization failed: {0}")]
    IndexClientInit(#[from] IndexError),
}

/// Build the port implementations for `config`.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let timeout = config.http_timeout_ms.map(Duration::from_millis);
    let index = HttpImageIndexClient::new(&config.index_base_url, timeout)?;
    info!(
        base_url = %index.base_url(),
        timeout_ms = config.http_timeout_ms,
        "image index client ready"
    );

    Ok(AppDeps {
        index: Arc::new(index),
        staging: Arc::new(FsFileStager::new()),
    })
}

/// Wire adapters and construct the app. Call [`ImaceApp::start`] afterwards.
pub fn build_app(config: &AppConfig) -> WiringResult<ImaceApp> {
    let deps = wire_dependencies(config)?;
    Ok(ImaceApp::new(deps, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imace_core::ImagePath;

    #[test]
    fn test_build_app_uses_configured_base_url() {
        let config = AppConfig {
            index_base_url: "http://index.local:9000/api".to_string(),
            ..AppConfig::default()
        };

        let app = build_app(&config).unwrap();

        assert_eq!(
            app.image_url(&ImagePath::new("cat.jpg")),
            "http://index.local:9000/api/image/cat.jpg"
        );
    }

    #[test]
    fn test_invalid_base_url_is_a_wiring_error() {
        let config = AppConfig {
            index_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };

        let err = wire_dependencies(&config).err().unwrap();

        assert!(matches!(
            err,
            WiringError::IndexClientInit(IndexError::InvalidBaseUrl { .. })
        ));
    }
}

//! # Configuration DTO
//!
//! Maps the TOML configuration file onto [`AppConfig`]. Missing keys take
//! their documented defaults; this module performs no I/O and no policy.

use crate::image::PageSize;

pub const DEFAULT_INDEX_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Application configuration DTO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the image index service (not validated here)
    pub index_base_url: String,

    /// Quiet period before a query is sent
    pub search_debounce_ms: u64,

    /// Page size the browse view starts with
    pub default_page_size: PageSize,

    /// Per-request HTTP timeout, unset (or `0`) means wait forever
    pub http_timeout_ms: Option<u64>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Only a page size outside of 12/24/36/48 is rejected, since the browse
    /// view cannot represent it.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let default_page_size = match toml_value
            .get("browse")
            .and_then(|b| b.get("default_page_size"))
            .and_then(|v| v.as_integer())
        {
            Some(raw) => PageSize::try_from(u32::try_from(raw).unwrap_or(0))?,
            None => PageSize::default(),
        };

        Ok(Self {
            index_base_url: toml_value
                .get("index")
                .and_then(|i| i.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_INDEX_BASE_URL)
                .to_string(),
            search_debounce_ms: toml_value
                .get("search")
                .and_then(|s| s.get("debounce_ms"))
                .and_then(|v| v.as_integer())
                .map(|ms| ms.max(0) as u64)
                .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
            default_page_size,
            http_timeout_ms: toml_value
                .get("http")
                .and_then(|h| h.get("timeout_ms"))
                .and_then(|v| v.as_integer())
                .filter(|ms| *ms > 0)
                .map(|ms| ms as u64),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_base_url: DEFAULT_INDEX_BASE_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            default_page_size: PageSize::default(),
            http_timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_uses_defaults_for_missing_keys() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.default_page_size, PageSize::Twelve);
    }

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [index]
            base_url = "http://index.local:9000"

            [search]
            debounce_ms = 150

            [browse]
            default_page_size = 36

            [http]
            timeout_ms = 10000
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.index_base_url, "http://index.local:9000");
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.default_page_size, PageSize::ThirtySix);
        assert_eq!(config.http_timeout_ms, Some(10_000));
    }

    #[test]
    fn test_from_toml_rejects_unsupported_page_size() {
        let toml_value: Value = toml::from_str("[browse]\ndefault_page_size = 10").unwrap();

        let err = AppConfig::from_toml(&toml_value).unwrap_err();

        assert!(err.to_string().contains("unsupported page size 10"));
    }

    #[test]
    fn test_from_toml_zero_or_negative_timeout_means_no_timeout() {
        for raw in ["0", "-5"] {
            let toml_value: Value =
                toml::from_str(&format!("[http]\ntimeout_ms = {raw}")).unwrap();

            let config = AppConfig::from_toml(&toml_value).unwrap();

            assert_eq!(config.http_timeout_ms, None, "timeout_ms = {raw}");
        }
    }
}

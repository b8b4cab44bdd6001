//! Configuration loader
//!
//! Reads the TOML file from disk and hands the parsed value to
//! [`AppConfig::from_toml`]. Defaults for missing keys live in the DTO.

use std::path::{Path, PathBuf};

use anyhow::Context;
use imace_core::config::AppConfig;
use tracing::{debug, info};

const APP_DIR_NAME: &str = "imace";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// Returns an error when the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;

    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// `<config_dir>/imace/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the config the binary runs with.
///
/// An explicit path must exist. Without one, the default location is tried
/// and its absence means built-in defaults.
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "loading config");
        return load_config(path);
    }

    match default_config_path() {
        Some(path) => load_or_default(&path),
        None => {
            debug!("no platform config directory, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<AppConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    info!(path = %path.display(), "loading config");
    load_config(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imace_core::PageSize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_every_section() {
        let temp_file = write_config(
            r#"
            [index]
            base_url = "http://index.local:9000"

            [search]
            debounce_ms = 150

            [browse]
            default_page_size = 36

            [http]
            timeout_ms = 10000
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.index_base_url, "http://index.local:9000");
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.default_page_size, PageSize::ThirtySix);
        assert_eq!(config.http_timeout_ms, Some(10_000));
    }

    #[test]
    fn test_load_config_empty_file_gives_defaults() {
        let temp_file = write_config("");

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_config("[index\nbase_url = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_rejects_unsupported_page_size() {
        let temp_file = write_config("[browse]\ndefault_page_size = 10\n");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let result = load_config(PathBuf::from("/this/path/does/not/exist/config.toml"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_missing_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_or_default(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = resolve_config(Some(dir.path().join("absent.toml")));

        assert!(result.is_err());
    }
}

//! Startup configuration read from `downloads.ron`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use app_logging::{app_info, LogDestination};
use downloads_engine::ApiSettings;
use log::LevelFilter;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILENAME: &str = "downloads.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogTarget,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            download_dir: api.download_dir,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            log_destination: LogTarget::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            download_dir: self.download_dir.clone(),
            ..ApiSettings::default()
        }
    }
}

/// Loads the configuration. An explicit path must exist; the default file is
/// optional and falls back to built-in defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILENAME));
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    let config = parse(&content).with_context(|| format!("invalid config {}", path.display()))?;
    app_info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn parse(content: &str) -> anyhow::Result<AppConfig> {
    Ok(ron::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config = parse(
            r#"(
                api_base_url: "http://10.0.0.5:8080",
                log_destination: Both,
                log_level: Debug,
            )"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://10.0.0.5:8080");
        assert_eq!(config.log_destination, LogTarget::Both);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.download_dir, ApiSettings::default().download_dir);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn settings_carry_timeouts_and_download_dir() {
        let config = AppConfig {
            connect_timeout_secs: 2,
            request_timeout_secs: 7,
            download_dir: PathBuf::from("/tmp/dl"),
            ..AppConfig::default()
        };
        let settings = config.api_settings();
        assert_eq!(settings.base_url, "http://localhost:5000");
        assert_eq!(settings.connect_timeout, Duration::from_secs(2));
        assert_eq!(settings.request_timeout, Duration::from_secs(7));
        assert_eq!(settings.download_dir, PathBuf::from("/tmp/dl"));
    }

    #[test]
    fn defaults_match_engine_settings() {
        let engine = ApiSettings::default();
        let settings = AppConfig::default().api_settings();
        assert_eq!(settings.base_url, engine.base_url);
        assert_eq!(settings.download_dir, engine.download_dir);
        assert_eq!(settings.connect_timeout, engine.connect_timeout);
        assert_eq!(settings.request_timeout, engine.request_timeout);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("downloads.ron");
        fs::write(&path, "(api_base_url: 42)").unwrap();
        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(load(Some(&temp.path().join("nope.ron"))).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.ron");
        fs::write(&path, "(download_dir: \"saved\")").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.download_dir, PathBuf::from("saved"));
    }
}

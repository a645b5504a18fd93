//! Runner configuration

use serde::Deserialize;
use std::path::Path;

use super::{Error, Result};

/// Page id of the command-line test tool page on the server
pub const DEFAULT_TEST_PAGE_ID: i32 = 130455;

/// Suite name used when the caller does not pick one
pub const DEFAULT_SUITE_NAME: &str = "DEFAULT";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Id of the test tool page to drive
    #[serde(default = "default_test_page_id")]
    pub test_page_id: i32,

    /// Name of the test suite to run against
    #[serde(default = "default_suite_name")]
    pub suite_name: String,

    /// Session timeout settings
    #[serde(default)]
    pub session: SessionSettings,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            test_page_id: default_test_page_id(),
            suite_name: default_suite_name(),
            session: SessionSettings::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid configuration file: {}", e)))
    }
}

fn default_test_page_id() -> i32 {
    DEFAULT_TEST_PAGE_ID
}

fn default_suite_name() -> String {
    DEFAULT_SUITE_NAME.to_string()
}

/// Timeout settings in seconds, handed to the session implementation
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Timeout for opening the session
    #[serde(default = "default_open_secs")]
    pub open_timeout_secs: u64,

    /// Timeout for individual field/action requests
    #[serde(default = "default_request_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            open_timeout_secs: default_open_secs(),
            request_timeout_secs: default_request_secs(),
        }
    }
}

fn default_open_secs() -> u64 {
    60
}

fn default_request_secs() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.test_page_id, 130455);
        assert_eq!(config.suite_name, "DEFAULT");
        assert_eq!(config.session.open_timeout_secs, 60);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "suite_name = \"NIGHTLY\"").unwrap();
        writeln!(file, "[session]").unwrap();
        writeln!(file, "request_timeout_secs = 30").unwrap();

        let config = RunnerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.suite_name, "NIGHTLY");
        assert_eq!(config.test_page_id, 130455);
        assert_eq!(config.session.request_timeout_secs, 30);
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "test_page_id = \"not a number\"").unwrap();

        let err = RunnerConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

//! Tutor service configuration from TOML (`[tutor]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tutor_domain::{ConfigIssue, ConfigIssueCode};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Raw tutor service configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTutorConfig {
    /// Base URL of the tutor backend (routes live under `/api`)
    pub base_url: String,
    /// Request timeout in seconds; no timeout when unset
    pub timeout_seconds: Option<u64>,
}

impl Default for FileTutorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl FileTutorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidUrl {
                    field: "tutor.base_url".to_string(),
                },
                format!("tutor.base_url: '{}' is not an http(s) URL", self.base_url),
            ));
        }

        if self.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout {
                    field: "tutor.timeout_seconds".to_string(),
                },
                "tutor.timeout_seconds cannot be 0",
            ));
        }

        issues
    }
}

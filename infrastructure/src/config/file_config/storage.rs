//! Catalog and profile storage configuration from TOML
//! (`[catalog]` and `[profile]` sections)

use super::expand_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tutor_domain::{ConfigIssue, ConfigIssueCode};

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// TSV poem file. The tutor service catalog is used when unset.
    pub path: Option<String>,
}

impl FileCatalogConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(expand_path)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        match (&self.path, self.resolved_path()) {
            (Some(raw), Some(path)) if !path.exists() => vec![ConfigIssue::error(
                ConfigIssueCode::MissingFile {
                    field: "catalog.path".to_string(),
                    path: raw.clone(),
                },
                format!("catalog.path: '{}' does not exist", raw),
            )],
            _ => vec![],
        }
    }
}

/// Where reader profiles are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileStoreKind {
    /// `POST /api/profile/save` on the tutor service
    #[default]
    Http,
    /// A local JSON file
    File,
}

impl FromStr for ProfileStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "remote" => Ok(ProfileStoreKind::Http),
            "file" | "local" | "json" => Ok(ProfileStoreKind::File),
            _ => Err(format!("unknown profile store: {}", s)),
        }
    }
}

/// Raw profile store configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProfileConfig {
    /// "http" or "file"
    pub store: String,
    /// JSON file for the file store
    pub path: Option<String>,
}

impl Default for FileProfileConfig {
    fn default() -> Self {
        Self {
            store: "http".to_string(),
            path: None,
        }
    }
}

impl FileProfileConfig {
    pub fn parse_store(&self) -> (ProfileStoreKind, Vec<ConfigIssue>) {
        match self.store.parse::<ProfileStoreKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "profile.store".to_string(),
                        value: self.store.clone(),
                        valid_values: vec!["http".to_string(), "file".to_string()],
                    },
                    format!(
                        "profile.store: unknown value '{}', falling back to 'http'",
                        self.store
                    ),
                );
                (ProfileStoreKind::default(), vec![issue])
            }
        }
    }

    /// File store location: the configured path, or
    /// `$XDG_DATA_HOME/verse-tutor/profiles.json`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(expand_path(path)),
            None => dirs::data_dir().map(|d| d.join("verse-tutor").join("profiles.json")),
        }
    }
}

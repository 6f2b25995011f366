//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Enum-like fields stay strings here and are parsed with a fallback plus a
//! [`ConfigIssue`] so a typo never prevents startup.

mod output;
mod repl;
mod session;
mod storage;
mod tutor;

pub use output::{FileLogConfig, FileOutputConfig};
pub use repl::FileReplConfig;
pub use session::FileSessionConfig;
pub use storage::{FileCatalogConfig, FileProfileConfig, ProfileStoreKind};
pub use tutor::{DEFAULT_BASE_URL, FileTutorConfig};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tutor_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session settings
    pub session: FileSessionConfig,
    /// Tutor service connection
    pub tutor: FileTutorConfig,
    /// Poem catalog source
    pub catalog: FileCatalogConfig,
    /// Profile persistence
    pub profile: FileProfileConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.session.parse_topology().1);
        issues.extend(self.tutor.validate());
        issues.extend(self.catalog.validate());
        issues.extend(self.profile.parse_store().1);
        issues
    }
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_domain::Topology;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[session]
topology = "pipeline"

[tutor]
base_url = "https://tutor.example.com"
timeout_seconds = 30

[profile]
store = "file"
path = "/var/lib/verse-tutor/profiles.json"

[output]
color = false

[repl]
show_progress = false
history_file = "~/.local/share/verse-tutor/history.txt"

[log]
conversation_dir = "/tmp/verse-tutor-logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.parse_topology().0, Topology::SequentialPipeline);
        assert_eq!(config.tutor.base_url, "https://tutor.example.com");
        assert_eq!(config.tutor.timeout_seconds, Some(30));
        assert_eq!(config.profile.parse_store().0, ProfileStoreKind::File);
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.log.resolved_dir(),
            Some(PathBuf::from("/tmp/verse-tutor-logs"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[tutor]
timeout_seconds = 10
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.tutor.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session.parse_topology().0, Topology::ParallelLens);
        assert!(config.catalog.path.is_none());
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.log.conversation_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[session]
topology = "star"

[tutor]
base_url = "localhost"

[profile]
store = "cloud"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(expand_path("poems.tsv"), PathBuf::from("poems.tsv"));
    }
}

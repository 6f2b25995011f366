//! Output and logging configuration from TOML (`[output]` and `[log]` sections)

use super::expand_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw conversation log configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Directory for JSONL conversation logs; disabled when unset
    pub conversation_dir: Option<String>,
}

impl FileLogConfig {
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        self.conversation_dir.as_deref().map(expand_path)
    }
}

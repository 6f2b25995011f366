//! Configuration file loading for verse-tutor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./verse-tutor.toml` or `./.verse-tutor.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/verse-tutor/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_BASE_URL, FileCatalogConfig, FileConfig, FileLogConfig, FileOutputConfig,
    FileProfileConfig, FileReplConfig, FileSessionConfig, FileTutorConfig, ProfileStoreKind,
};
pub use loader::ConfigLoader;

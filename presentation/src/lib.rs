//! Presentation layer for verse-tutor
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive reading REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ReplCommand, TutorRepl};
pub use cli::commands::{Cli, TopologyArg};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};

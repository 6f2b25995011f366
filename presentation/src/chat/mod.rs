//! Interactive reading module
//!
//! Provides a readline-based interface that walks a reader through profile
//! setup, poem selection and the conversation with the tutor agents.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::TutorRepl;

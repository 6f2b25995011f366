//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - value-object construction errors
//! - [`text`] - small text helpers used for previews and input checks

pub mod error;
pub mod text;

//! Tutor backend adapter.
//!
//! - [`HttpTutorService`] implements the
//!   [`TutorService`](tutor_application::TutorService) port
//! - [`wire`] holds the JSON shapes shared with the catalog and profile
//!   adapters

mod service;
pub mod wire;

pub use service::{HttpTutorService, LENS_OPENING_INPUT, TEACHER_OPENING_INPUT};

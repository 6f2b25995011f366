//! Progress notification port
//!
//! Defines the interface for reporting tutor requests while they are
//! outstanding.

use tutor_domain::{RequestKind, Targets};

/// Callback for tutor request progress
///
/// Implementations live in the presentation layer (spinner, plain text).
pub trait ProgressNotifier: Send + Sync {
    /// Called right after a request was dispatched
    fn on_request_start(&self, kind: RequestKind, targets: Option<Targets>);

    /// Called once the request resolved, before the reply is merged
    fn on_request_complete(&self, kind: RequestKind, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _kind: RequestKind, _targets: Option<Targets>) {}
    fn on_request_complete(&self, _kind: RequestKind, _success: bool) {}
}

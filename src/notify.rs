use tracing::{info, warn};

/// Severity of a user-facing notification, mirroring the two toast kinds the
/// presentation layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Fire-and-forget notification surface.
///
/// Implementations must never fail or block; the loader and the auth session
/// call this on a best-effort basis and carry on regardless.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Production notifier: routes notices through the log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => info!(target: "audioshelf::notice", "{message}"),
            NoticeLevel::Error => warn!(target: "audioshelf::notice", "{message}"),
        }
    }
}

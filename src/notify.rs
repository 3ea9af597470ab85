use notify_rust::{Notification, Timeout};

/// Outbound side effect for transient success messages.
pub trait Notifier {
    fn notify(&self, summary: &str, body: &str);
}

/// Sends messages to the desktop notification daemon.
pub struct DesktopNotifier {
    timeout_ms: u32,
}

impl DesktopNotifier {
    pub fn new(toast_seconds: u64) -> Self {
        let timeout_ms = u32::try_from(toast_seconds.saturating_mul(1000)).unwrap_or(u32::MAX);
        DesktopNotifier { timeout_ms }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) {
        let result = Notification::new()
            .summary(summary)
            .body(body)
            .appname("pomodo")
            .icon("alarm-clock")
            .timeout(Timeout::Milliseconds(self.timeout_ms))
            .show();

        // A missing notification daemon should not take the UI down
        if let Err(e) = result {
            tracing::warn!(error = %e, "desktop notification failed");
        }
    }
}

/// Drops every message; the in-app toast is still shown.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _summary: &str, _body: &str) {}
}

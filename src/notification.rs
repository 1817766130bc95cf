use crate::constants::app;

/// Best-effort desktop notification; failures are only logged
pub fn send(summary: &str, body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname(app::WINDOW_TITLE)
        .summary(summary)
        .body(&body)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}

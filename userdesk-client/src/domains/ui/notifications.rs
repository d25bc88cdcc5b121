use std::fmt;

use log::{error, info, warn};

use crate::infra::constants::GENERIC_ERROR_MESSAGE;
use crate::infra::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Default,
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Default => "default",
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where controllers send user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationType, message: &str);
}

/// Routes notifications into the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationType, message: &str) {
        match kind {
            NotificationType::Error => error!("[Notification] {}", message),
            NotificationType::Warning => warn!("[Notification] {}", message),
            _ => info!("[Notification] {}: {}", kind, message),
        }
    }
}

/// Notify with `message` as given, or the generic fallback when it is
/// missing or blank.
pub fn send_notification(
    notifier: &dyn Notifier,
    kind: NotificationType,
    message: Option<&str>,
) {
    let text = message
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(GENERIC_ERROR_MESSAGE);
    notifier.notify(kind, text);
}

pub(crate) fn notify_failure(notifier: &dyn Notifier, err: &ClientError) {
    warn!("[Notification] Request failed: {}", err);
    send_notification(notifier, NotificationType::Error, err.server_message());
}

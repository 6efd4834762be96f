//! Tracing Notifier Implementation

use crate::application::ports::{Notification, NotificationLevel, NotifierPort};

/// 把提示写入日志的通知器
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotifierPort for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                tracing::warn!(target: "notification", "{}", notification.message)
            }
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(target: "notification", level = ?notification.level, "{}", notification.message)
            }
        }
    }
}

//! User-visible, dismissible notifications.
//!
//! Failures caught at a call site end up here instead of propagating.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Info => f.write_str("info"),
            NotificationLevel::Success => f.write_str("success"),
            NotificationLevel::Warning => f.write_str("warning"),
            NotificationLevel::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Sink for user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: String);
}

/// Keeps active notifications until dismissed and mirrors them to `tracing`.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    inner: Mutex<CenterState>,
}

#[derive(Debug, Default)]
struct CenterState {
    next_id: u64,
    active: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.lock().active.clone()
    }

    /// Removes one notification. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = self.lock();
        let before = state.active.len();
        state.active.retain(|n| n.id != id);
        state.active.len() != before
    }

    /// Removes and returns every active notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut self.lock().active)
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        self.lock().active.iter().filter(|n| n.level == level).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CenterState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, level: NotificationLevel, message: String) {
        match level {
            NotificationLevel::Error => tracing::error!("[Notification] {}", message),
            NotificationLevel::Warning => tracing::warn!("[Notification] {}", message),
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!("[Notification] {}", message)
            }
        }

        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.active.push(Notification { id, level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_and_dismiss() {
        let center = NotificationCenter::new();
        center.notify(
            NotificationLevel::Error,
            "Connection error. Please try again.".to_string(),
        );
        center.notify(NotificationLevel::Success, "CV uploaded successfully!".to_string());

        let active = center.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].level, NotificationLevel::Error);

        assert!(center.dismiss(active[0].id));
        assert!(!center.dismiss(active[0].id));
        assert_eq!(center.count(NotificationLevel::Success), 1);

        assert_eq!(center.drain().len(), 1);
        assert!(center.active().is_empty());
    }
}

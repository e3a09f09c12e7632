//! Transient user-facing messages ("toasts").

use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);
pub const ERROR_DURATION: Duration = Duration::from_secs(5);
pub const DISMISS_LABEL: &str = "Close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub action_label: &'static str,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            action_label: DISMISS_LABEL,
            duration: SUCCESS_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            action_label: DISMISS_LABEL,
            duration: ERROR_DURATION,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

struct ActiveToast {
    id: ToastId,
    notification: Notification,
    shown_at: Instant,
}

struct CenterState {
    toasts: Vec<ActiveToast>,
    next_id: u64,
}

/// Holds visible notifications until they expire or are dismissed.
pub struct NotificationCenter {
    state: Mutex<CenterState>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CenterState {
                toasts: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn push_at(&self, notification: Notification, now: Instant) -> ToastId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ToastId(state.next_id);
        state.next_id += 1;
        state.toasts.push(ActiveToast {
            id,
            notification,
            shown_at: now,
        });
        id
    }

    /// Drops expired toasts and returns the rest, oldest first.
    pub fn visible_at(&self, now: Instant) -> Vec<(ToastId, Notification)> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < toast.notification.duration);
        state
            .toasts
            .iter()
            .map(|toast| (toast.id, toast.notification.clone()))
            .collect()
    }

    pub fn visible(&self) -> Vec<(ToastId, Notification)> {
        self.visible_at(Instant::now())
    }

    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let before = state.toasts.len();
        state.toasts.retain(|toast| toast.id != id);
        state.toasts.len() != before
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_error_use_different_lifetimes() {
        assert_eq!(Notification::success("ok").duration, SUCCESS_DURATION);
        assert_eq!(Notification::error("bad").duration, ERROR_DURATION);
        assert!(Notification::error("bad").is_error());
    }

    #[test]
    fn toasts_expire_after_their_duration() {
        let center = NotificationCenter::new();
        let start = Instant::now();
        center.push_at(Notification::success("saved"), start);
        center.push_at(Notification::error("failed"), start);

        assert_eq!(center.visible_at(start + Duration::from_secs(1)).len(), 2);
        let remaining = center.visible_at(start + Duration::from_secs(4));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1.message, "failed");
        assert!(center.visible_at(start + Duration::from_secs(6)).is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_named_toast() {
        let center = NotificationCenter::new();
        let now = Instant::now();
        let first = center.push_at(Notification::error("one"), now);
        center.push_at(Notification::error("two"), now);

        assert!(center.dismiss(first));
        assert!(!center.dismiss(first));
        let visible = center.visible_at(now);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].1.message, "two");
    }
}

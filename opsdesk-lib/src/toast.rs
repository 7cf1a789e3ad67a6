//! Transient user notifications

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;
use std::time::Instant;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// How a toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A toast notification.
///
/// ```ignore
/// toasts.push(Toast::success("Saved"));
/// toasts.push(Toast::error(e.message()).with_duration(Duration::from_secs(6)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "✔ {}", self.message),
            ToastKind::Error => write!(f, "✖ {}", self.message),
            ToastKind::Info => write!(f, "• {}", self.message),
        }
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Shared toast queue.
///
/// Clones share the same queue. Views push; the front end either polls
/// [`Toasts::active`] to draw what is still visible or [`Toasts::drain`]s
/// everything to print it once.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    queue: Arc<Mutex<VecDeque<(Toast, Instant)>>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<(Toast, Instant)>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, toast: impl Into<Toast>) {
        let toast = toast.into();
        match toast.kind {
            ToastKind::Error => log::warn!("toast: {}", toast.message),
            _ => log::info!("toast: {}", toast.message),
        }
        self.queue().push_back((toast, Instant::now()));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Toasts still within their duration, oldest first. Expired ones are
    /// dropped from the queue.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut queue = self.queue();
        queue.retain(|(toast, shown_at)| now.duration_since(*shown_at) < toast.duration);
        queue.iter().map(|(toast, _)| toast.clone()).collect()
    }

    /// Takes every queued toast regardless of age.
    pub fn drain(&self) -> Vec<Toast> {
        self.queue().drain(..).map(|(toast, _)| toast).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let toast = Toast::error("Failed");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.duration, DEFAULT_TOAST_DURATION);
        assert_eq!(toast.to_string(), "✖ Failed");
        assert_eq!(Toast::from("hi").kind, ToastKind::Info);
    }

    #[test]
    fn test_active_prunes_expired() {
        let toasts = Toasts::new();
        toasts.push(Toast::info("gone").with_duration(Duration::ZERO));
        toasts.success("Saved");
        let active = toasts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Saved");
        // The expired entry is gone from the queue too.
        assert_eq!(toasts.drain().len(), 1);
    }

    #[test]
    fn test_drain_empties_shared_queue() {
        let toasts = Toasts::new();
        let view_side = toasts.clone();
        view_side.success("Created");
        view_side.error("Denied");
        let drained: Vec<ToastKind> = toasts.drain().into_iter().map(|t| t.kind).collect();
        assert_eq!(drained, vec![ToastKind::Success, ToastKind::Error]);
        assert!(toasts.drain().is_empty());
    }
}

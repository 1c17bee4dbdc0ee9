//! Notifications emitted by the stores after user-visible changes.
//!
//! A render adapter implements [`Notifier`] to show toasts and refresh the
//! cart list; stores hold it as an optional trait object and call it after
//! every mutation has been persisted.

use std::sync::Mutex;

use crate::cart::CartSnapshot;

/// Severity of a notice, mirroring the toast styles on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A short message for the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }
}

/// Receiver for store notifications.
pub trait Notifier: Send + Sync {
    /// Show a notice to the visitor.
    fn notify(&self, notice: &Notice);

    /// The cart changed; `snapshot` is its state after the mutation.
    fn cart_changed(&self, _snapshot: &CartSnapshot) {}
}

/// Notifier that writes notices to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(level = ?notice.level, "{}", notice.message);
            }
            NoticeLevel::Warning | NoticeLevel::Error => {
                tracing::warn!(level = ?notice.level, "{}", notice.message);
            }
        }
    }

    fn cart_changed(&self, snapshot: &CartSnapshot) {
        tracing::debug!(
            lines = snapshot.items.len(),
            item_count = snapshot.item_count,
            total = %snapshot.totals.total,
            "Cart changed"
        );
    }
}

/// Notifier that queues notices until a render pass drains them.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: Mutex<Vec<Notice>>,
    cart_changes: Mutex<usize>,
}

impl NoticeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notice, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }

    /// Number of cart change callbacks received so far.
    #[must_use]
    pub fn cart_changes(&self) -> usize {
        self.cart_changes.lock().map_or(0, |count| *count)
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }

    fn cart_changed(&self, _snapshot: &CartSnapshot) {
        if let Ok(mut count) = self.cart_changes.lock() {
            *count += 1;
        }
    }
}

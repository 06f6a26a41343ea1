//! Transient user notices
//!
//! The roster controller reports outcomes through an injected [`Notifier`].
//! [`NoticeBoard`] keeps recent notices for the terminal UI to show;
//! [`TracingNotifier`] only logs them.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outbound notification channel
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, text: &str) {
        self.notify(Notice::new(NoticeLevel::Success, text));
    }

    fn info(&self, text: &str) {
        self.notify(Notice::new(NoticeLevel::Info, text));
    }

    fn error(&self, text: &str) {
        self.notify(Notice::new(NoticeLevel::Error, text));
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(notice = %notice.text, "notice"),
            _ => tracing::info!(notice = %notice.text, "notice"),
        }
    }
}

/// Bounded queue of recent notices, oldest dropped first
#[derive(Debug)]
pub struct NoticeBoard {
    notices: Mutex<VecDeque<Notice>>,
    capacity: usize,
}

impl NoticeBoard {
    pub const DEFAULT_CAPACITY: usize = 32;

    pub fn new(capacity: usize) -> Self {
        Self {
            notices: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn latest(&self) -> Option<Notice> {
        self.notices.lock().back().cloned()
    }

    /// Take every queued notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        self.notices.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        TracingNotifier.notify(notice.clone());
        let mut notices = self.notices.lock();
        if notices.len() == self.capacity {
            notices.pop_front();
        }
        notices.push_back(notice);
    }
}

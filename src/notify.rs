//! User-facing notifications
//!
//! Thread-safe, append-only log of notices surfaced to the user:
//! - Notice: envelope with id + relative timestamp + severity + message
//! - NoticeLog: cloneable handle over shared storage
//!
//! Submission outcomes land here instead of propagating errors up the
//! call stack; a UI loop drains the log and renders transient toasts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// How a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single user-visible notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Monotonic sequence ID (for ordering)
    pub id: u64,
    /// Time since the log was created (ms)
    pub timestamp_ms: u64,
    pub severity: Severity,
    pub message: String,
}

/// Thread-safe, append-only notice log
#[derive(Clone)]
pub struct NoticeLog {
    notices: Arc<RwLock<Vec<Notice>>>,
    start_time: Instant,
    next_id: Arc<AtomicU64>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self {
            notices: Arc::new(RwLock::new(Vec::new())),
            start_time: Instant::now(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Append a notice (thread-safe, returns its ID)
    pub fn push(&self, severity: Severity, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let notice = Notice {
            id,
            timestamp_ms: self.start_time.elapsed().as_millis() as u64,
            severity,
            message: message.into(),
        };
        self.notices.write().push(notice);
        id
    }

    /// All notices so far (cloned)
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.read().clone()
    }

    /// Notices of one severity
    pub fn with_severity(&self, severity: Severity) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| n.severity == severity)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NoticeLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeLog").field("len", &self.len()).finish()
    }
}

//! Notification events — every workflow outcome emits exactly one notice.
//!
//! The presentation layer (toast, chat channel, dashboard) lives outside this
//! workspace; it consumes notices through the [`Notifier`] trait. The default
//! [`NoticeLog`] keeps a bounded in-memory history and mirrors each notice to
//! the diagnostic log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// How long a notice should stay visible, in milliseconds.
pub const DEFAULT_LIFETIME_MS: u64 = 5_000;

const HISTORY_CAP: usize = 100;

/// Notice severity, mirrored into the log level by [`NoticeLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

/// A user-facing notification event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    /// Short headline ("Success", "Warning", "Error").
    pub summary: String,
    /// Full message shown to the user.
    pub detail: String,
    pub lifetime_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    pub fn new(severity: Severity, summary: &str, detail: &str) -> Self {
        Self {
            severity,
            summary: summary.to_string(),
            detail: detail.to_string(),
            lifetime_ms: DEFAULT_LIFETIME_MS,
            timestamp: Utc::now(),
        }
    }

    pub fn success(detail: &str) -> Self {
        Self::new(Severity::Success, "Success", detail)
    }

    pub fn warn(detail: &str) -> Self {
        Self::new(Severity::Warn, "Warning", detail)
    }

    pub fn error(detail: &str) -> Self {
        Self::new(Severity::Error, "Error", detail)
    }
}

/// Outbound notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: Notice);
}

/// Default notifier — bounded history plus a log mirror.
pub struct NoticeLog {
    history: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of recorded notices, oldest first.
    pub fn history(&self) -> Vec<Notice> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NoticeLog {
    async fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Success | Severity::Info => {
                tracing::info!("{}: {}", notice.summary, notice.detail)
            }
            Severity::Warn => tracing::warn!("{}: {}", notice.summary, notice.detail),
            Severity::Error => tracing::error!("{}: {}", notice.summary, notice.detail),
        }
        if let Ok(mut history) = self.history.lock() {
            history.push(notice);
            // Ring buffer — keep the most recent entries only
            if history.len() > HISTORY_CAP {
                history.remove(0);
            }
        }
    }
}

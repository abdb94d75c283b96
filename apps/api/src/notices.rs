//! Transient user-facing notices (info / success / error).
//!
//! The export service reports progress through [`Notifier`]; the editor polls
//! `GET /api/v1/notices` to render them.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Bounded history of recent notices, mirrored to the log.
pub struct NoticeBoard {
    capacity: usize,
    notices: Mutex<VecDeque<Notice>>,
}

impl NoticeBoard {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            notices: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => error!(notice = ?level, "{message}"),
            NoticeLevel::Info | NoticeLevel::Success => info!(notice = ?level, "{message}"),
        }

        if let Ok(mut notices) = self.notices.lock() {
            if notices.len() == self.capacity {
                notices.pop_front();
            }
            notices.push_back(Notice {
                level,
                message: message.to_string(),
                at: Utc::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_keeps_order_and_capacity() {
        let board = NoticeBoard::new(2);
        board.notify(NoticeLevel::Info, "one");
        board.notify(NoticeLevel::Success, "two");
        board.notify(NoticeLevel::Error, "three");

        let recent = board.recent();
        let messages: Vec<_> = recent.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(recent[1].level, NoticeLevel::Error);
    }

    #[test]
    fn test_zero_capacity_still_keeps_latest() {
        let board = NoticeBoard::new(0);
        board.notify(NoticeLevel::Info, "only");
        assert_eq!(board.recent().len(), 1);
    }

    #[test]
    fn test_level_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&NoticeLevel::Success).unwrap(),
            "\"success\""
        );
    }
}

//! Narrative event log and transient notification sink.
//!
//! Both are bounded ring buffers. The event log survives in the save
//! payload; notices are UI-transient and never persisted.

use crate::constants::{LOG_CAPACITY, NOTICE_CAPACITY};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One narrative log line shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub message: String,
    /// Human-readable wall-clock time; formatting is not part of the contract.
    pub time: String,
}

/// Bounded narrative log, most recent entries kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let entry = LogEntry {
            id: self.next_id,
            message: message.into(),
            time: chrono::Local::now().format("%H:%M").to_string(),
        };
        self.next_id += 1;
        self.entries.push_back(entry);
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// A transient UI notice (e.g. "Not enough energy").
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Bounded queue of transient notices. Excluded from saves.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: VecDeque<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Warning, message.into());
    }

    fn push(&mut self, kind: NoticeKind, message: String) {
        self.notices.push_back(Notice { kind, message });
        while self.notices.len() > NOTICE_CAPACITY {
            self.notices.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Drains all pending notices, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_caps_at_capacity() {
        let mut log = EventLog::new();
        for i in 0..LOG_CAPACITY + 10 {
            log.push(format!("entry {}", i));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        // Oldest entries were dropped
        let first = log.entries().next().unwrap();
        assert_eq!(first.message, "entry 10");
    }

    #[test]
    fn test_log_ids_monotonic() {
        let mut log = EventLog::new();
        log.push("a");
        log.push("b");
        let ids: Vec<u64> = log.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_notice_board_caps_and_drains() {
        let mut board = NoticeBoard::new();
        for i in 0..NOTICE_CAPACITY + 3 {
            board.warn(format!("notice {}", i));
        }
        let drained = board.drain();
        assert_eq!(drained.len(), NOTICE_CAPACITY);
        assert!(board.last().is_none());
    }
}

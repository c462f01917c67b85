//! Bounded, newest-first log panel.

use serde::Serialize;
use shared_types::LogEntry;
use std::collections::VecDeque;

/// Lines kept on screen.
pub const LOG_PANEL_CAPACITY: usize = 20;

/// Newest entry at the head; the oldest falls off the tail once full.
#[derive(Debug, Clone, Serialize)]
pub struct LogPanel {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    #[serde(skip)]
    evicted: u64,
}

impl LogPanel {
    pub fn new() -> Self {
        Self::with_capacity(LOG_PANEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    /// Prepend an entry, returning how many old entries were dropped.
    pub fn push(&mut self, entry: LogEntry) -> usize {
        self.entries.push_front(entry);
        let mut dropped = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
            dropped += 1;
        }
        self.evicted += dropped as u64;
        dropped
    }

    /// Entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries oldest first, in the order they were appended.
    pub fn chronological(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

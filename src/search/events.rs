//! Bounded, user-visible session event log.
//!
//! Every event is mirrored to `tracing`, so nothing recorded here is lost from the process logs
//! when the in-memory log drops its oldest entries.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info};

use crate::constants::DEFAULT_EVENT_LOG_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEvent {
    pub timestamp: DateTime<Utc>,
    pub level: EventLevel,
    pub message: String,
}

#[derive(Debug)]
pub struct EventLog {
    capacity: usize,
    entries: Mutex<VecDeque<SearchEvent>>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub fn push(&self, level: EventLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            EventLevel::Error => error!(event = %message, "Search event"),
            EventLevel::Info | EventLevel::Success => info!(event = %message, "Search event"),
        }

        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(SearchEvent {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(EventLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(EventLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(EventLevel::Error, message);
    }

    /// Oldest-first copy of the log.
    pub fn snapshot(&self) -> Vec<SearchEvent> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/*!
 * Event Collector
 * Bounded in-memory history of lifecycle events plus running counters
 */

use super::events::{Category, Event, EventFilter, Payload};
use crate::core::limits::DEFAULT_EVENT_HISTORY;
use crate::core::serde::is_zero_u64;
use crate::core::types::Pid;
use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Lifecycle counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EventCounts {
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub admitted: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub rejected: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub terminated: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub total: u64,
}

/// Event collector
///
/// Oldest events are overwritten once the history is full; the counters
/// keep counting.
#[derive(Clone)]
pub struct Collector {
    history: Arc<Mutex<HeapRb<Event>>>,
    capacity: usize,
    admitted: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
    terminated: Arc<AtomicU64>,
    total: Arc<AtomicU64>,
}

impl Collector {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: Arc::new(Mutex::new(HeapRb::<Event>::new(capacity))),
            capacity,
            admitted: Arc::new(AtomicU64::new(0)),
            rejected: Arc::new(AtomicU64::new(0)),
            terminated: Arc::new(AtomicU64::new(0)),
            total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an event
    pub fn emit(&self, event: Event) {
        match event.payload {
            Payload::ProcessAdmitted { .. } => {
                self.admitted.fetch_add(1, Ordering::Relaxed);
            }
            Payload::ProcessRejected { .. } => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
            }
            Payload::ProcessTerminated { .. } => {
                self.terminated.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
        self.total.fetch_add(1, Ordering::Relaxed);

        trace!(category = ?event.category, pid = ?event.pid, "Event recorded");
        self.history.lock().push_overwrite(event);
    }

    /// All retained events, oldest first
    pub fn history(&self) -> Vec<Event> {
        self.history.lock().iter().cloned().collect()
    }

    /// The `n` most recent events, oldest first
    pub fn recent(&self, n: usize) -> Vec<Event> {
        let history = self.history.lock();
        let skip = history.occupied_len().saturating_sub(n);
        history.iter().skip(skip).cloned().collect()
    }

    pub fn filter(&self, filter: &EventFilter) -> Vec<Event> {
        self.history
            .lock()
            .iter()
            .filter(|e| e.matches(filter))
            .cloned()
            .collect()
    }

    pub fn by_pid(&self, pid: Pid) -> Vec<Event> {
        self.filter(&EventFilter::new().pid(pid))
    }

    /// Status lines for retained process events
    pub fn status_lines(&self) -> Vec<String> {
        self.filter(&EventFilter::new().category(Category::Process))
            .iter()
            .filter_map(Event::status_line)
            .collect()
    }

    pub fn counts(&self) -> EventCounts {
        EventCounts {
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            terminated: self.terminated.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.history.lock().occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("capacity", &self.capacity)
            .field("counts", &self.counts())
            .finish()
    }
}

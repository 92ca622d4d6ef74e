use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tracing::Level;

/// A captured tracing event, as displayed on the logs screen
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Bounded in-memory log store shared between the tracing layer and the
/// render loop. Once full, the oldest entry makes room for each new one.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    inner: Arc<RwLock<VecDeque<LogEntry>>>,
    cap: usize,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(VecDeque::with_capacity(cap))),
            cap,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.inner.write().unwrap();
        while entries.len() >= self.cap {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of the current contents, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner.read().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}

//! Fixed-capacity record pool

use super::record::LogRecord;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reference pool capacity: at most this many records may be in flight
/// before producers start recycling undelivered slots.
pub const DEFAULT_POOL_CAPACITY: usize = 128;

/// Arena of preallocated record slots indexed by a wrapping cursor.
///
/// `acquire` never fails and never allocates; slots are recycled forever.
/// The capacity contract belongs to callers: once more than `capacity`
/// records are in flight, a producer repopulates a slot whose previous
/// content has not been delivered yet and the older record is lost. That
/// is the documented overload behavior (bounded memory over strict
/// durability) and it is neither detected nor reported.
pub struct RecordPool {
    slots: Box<[Mutex<LogRecord>]>,
    cursor: AtomicUsize,
}

impl RecordPool {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "record pool capacity must be non-zero");
        let slots: Vec<Mutex<LogRecord>> = (0..capacity)
            .map(|_| Mutex::new(LogRecord::default()))
            .collect();
        Self {
            slots: slots.into_boxed_slice(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Claim the next slot index by advancing the shared cursor.
    pub fn acquire(&self) -> usize {
        self.cursor.fetch_add(1, Ordering::Relaxed) % self.slots.len()
    }

    pub fn slot(&self, index: usize) -> &Mutex<LogRecord> {
        &self.slots[index]
    }

    /// Clone a slot's current contents for delivery, so sink IO never runs
    /// under a slot lock.
    pub fn snapshot(&self, index: usize) -> LogRecord {
        self.slots[index].lock().clone()
    }
}

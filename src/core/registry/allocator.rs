//! Id allocation
//!
//! The registry draws location ids from an injected allocator so tests can
//! control the sequence and no id counter lives in module state.

/// Source of process-unique integer ids
pub trait IdAllocator: Send + Sync {
    /// Returns the next id; never repeats a previous value
    fn next(&mut self) -> u64;
}

/// Monotonic counter
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Counter whose first id is `start`
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl IdAllocator for SequentialIds {
    fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

//! In-memory storage

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{StorageAdapter, StorageError};

/// In-memory storage adapter for tests and ephemeral sessions.
///
/// Uses `RefCell` for interior mutability since the cart engine is
/// single-threaded. Failure simulation flips reads or writes into
/// [`StorageError::Unavailable`] so callers can exercise their degradation
/// paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read fail until turned off again.
    pub fn simulate_read_failures(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Makes every subsequent write or removal fail until turned off again.
    pub fn simulate_write_failures(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StorageAdapter for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable("simulated read failure".to_string()));
        }

        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("simulated write failure".to_string()));
        }

        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("simulated write failure".to_string()));
        }

        self.values.borrow_mut().remove(key);

        Ok(())
    }
}

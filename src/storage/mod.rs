//! Persistent storage

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed with an I/O error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused the operation (full, read-only, or unavailable).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Abstract interface for a persistent string key-value store.
///
/// This trait handles the "where" of persistence (filesystem vs memory),
/// while [`Cart`](crate::cart::Cart) decides what gets written and when.
/// Adapters take `&self` for every method; single-threaded implementations
/// are free to use interior mutability.
pub trait StorageAdapter {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written or has been
    /// removed; reserves `Err` for real failures of the medium.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the underlying medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the underlying medium fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

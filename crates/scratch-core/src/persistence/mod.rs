//! Persistence adapter
//!
//! Remembers the assigned prize and the completion flag across sessions.
//! Persistence is an enhancement: every storage failure degrades to "no
//! prior state" on read and is dropped on write, so a session keeps working
//! ephemerally when storage is disabled or full.
//!
//! # Layers
//!
//! ```text
//! ScratchSurface / session ──► Persistence (infallible)
//!                                   │
//!                       StoragePersistence<S>   EphemeralPersistence
//!                                   │
//!                           KeyValueStore (fallible)
//!                          MemoryStore  JsonFileStore
//! ```

mod store;

pub use store::{JsonFileStore, MemoryStore};

use crate::config::StorageKeys;
use crate::error::StorageError;

/// Serialized form of the completion flag
pub const COMPLETE_FLAG: &str = "true";

/// Raw string key/value storage, the shape of browser local storage
pub trait KeyValueStore: Send + Sync {
    /// Read a key
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a key, overwriting any previous value
    ///
    /// # Errors
    /// Returns `StorageError` if the backend rejects the write
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Assignment and completion persistence as seen by the scratch surface
///
/// Infallible by contract: implementations absorb storage failures.
pub trait Persistence: Send + Sync {
    /// Previously assigned prize id, if any
    fn assigned_prize_id(&self) -> Option<String>;

    /// Record the assigned prize id (overwrites)
    fn set_assigned_prize_id(&self, id: &str);

    /// Whether a previous session completed the scratch
    fn is_scratch_complete(&self) -> bool;

    /// Record completion (idempotent)
    fn mark_scratch_complete(&self);
}

/// Persistence backed by a key/value store, soft-failing on every error
#[derive(Debug, Clone)]
pub struct StoragePersistence<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> StoragePersistence<S> {
    /// Create adapter over `store` using `keys`
    #[inline]
    #[must_use]
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, %error, "storage read failed, assuming no prior state");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(error) = self.store.set(key, value) {
            tracing::warn!(
                key,
                %error,
                transient = error.is_transient(),
                "storage write dropped"
            );
        }
    }
}

impl<S: KeyValueStore> Persistence for StoragePersistence<S> {
    fn assigned_prize_id(&self) -> Option<String> {
        self.read(&self.keys.prize_id).filter(|id| !id.is_empty())
    }

    fn set_assigned_prize_id(&self, id: &str) {
        self.write(&self.keys.prize_id, id);
    }

    fn is_scratch_complete(&self) -> bool {
        self.read(&self.keys.scratch_done).as_deref() == Some(COMPLETE_FLAG)
    }

    fn mark_scratch_complete(&self) {
        self.write(&self.keys.scratch_done, COMPLETE_FLAG);
    }
}

/// Persistence that remembers nothing, used when persistence is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct EphemeralPersistence;

impl Persistence for EphemeralPersistence {
    fn assigned_prize_id(&self) -> Option<String> {
        None
    }

    fn set_assigned_prize_id(&self, _id: &str) {}

    fn is_scratch_complete(&self) -> bool {
        false
    }

    fn mark_scratch_complete(&self) {}
}

//! Client-side Key-Value Storage
//!
//! The session persists two string entries (`user` and `accessToken`)
//! across restarts. Each front end supplies its own backing store:
//!
//! - **memory**: `MemoryStorage`, process-local (tests, one-shot tools)
//! - **file**: `FileStorage`, a JSON map on disk (native CLI, `native` feature)
//! - the Leptos frontend wraps `window.localStorage`
//!
//! # Example
//!
//! ```rust
//! use toyproject::storage::{KeyValueStorage, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! storage.set("accessToken", "abc").unwrap();
//! assert_eq!(storage.get("accessToken").unwrap().as_deref(), Some("abc"));
//! ```

pub mod error;
#[cfg(feature = "native")]
pub mod file;
pub mod memory;

use std::rc::Rc;
use std::sync::Arc;

pub use error::{StorageError, StorageResult};
#[cfg(feature = "native")]
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// String key-value store with browser `localStorage` semantics
///
/// Methods take `&self`; implementations use interior mutability so a
/// store can be shared between the session and the API client.
pub trait KeyValueStorage {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Insert or replace a value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Thread-safe shared store, as held by the native client and context
pub type SharedStorage = Arc<dyn KeyValueStorage + Send + Sync>;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::StorageConfig;
use crate::errors::Result;

pub mod backend;
pub mod encoder;

pub use backend::{FileStore, MemoryStore};
pub use encoder::{KEY_LEN, encode};

/// The three-operation contract every backend satisfies.
///
/// Backends are single-threaded: every operation takes `&mut self`, and the
/// file backend moves its read cursor even on `get`. Share a backend across
/// threads through [`SharedStore`].
pub trait Storer: Send {
    /// Store `value` and return its key. Adding a value that is already
    /// stored returns the existing key and writes nothing.
    fn add(&mut self, value: &str) -> Result<String>;

    /// Resolve `key` back to its value, or fail with `NotFound`.
    fn get(&mut self, key: &str) -> Result<String>;

    /// Release the backend's resources.
    fn close(&mut self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// A [`Storer`] behind one exclusive lock.
///
/// Each call holds the lock for its full duration, so a file scan and the
/// append that may follow it are never interleaved with another request.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Box<dyn Storer>>>,
    backend: &'static str,
}

impl SharedStore {
    pub fn new(storer: Box<dyn Storer>) -> Self {
        let backend = storer.backend_name();
        Self {
            inner: Arc::new(Mutex::new(storer)),
            backend,
        }
    }

    pub fn add(&self, value: &str) -> Result<String> {
        self.inner.lock().add(value)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.inner.lock().get(key)
    }

    pub fn close(&self) -> Result<()> {
        self.inner.lock().close()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore")
            .field("backend", &self.backend)
            .finish()
    }
}

pub struct StorageFactory;

impl StorageFactory {
    /// Pick the backend from configuration: a non-empty file path selects the
    /// file store, anything else the memory store.
    pub fn create_backend(config: &StorageConfig) -> Result<Box<dyn Storer>> {
        match config.file_path() {
            Some(path) => Ok(Box::new(FileStore::open(path)?)),
            None => Ok(Box::new(MemoryStore::new())),
        }
    }

    pub fn create(config: &StorageConfig) -> Result<SharedStore> {
        Self::create_backend(config).map(SharedStore::new)
    }
}

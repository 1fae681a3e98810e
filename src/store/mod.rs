pub mod disk;
pub mod memory;

use crate::core::cache::KeyValueCollection;
use disk::DiskCollection;
use fjall::Keyspace;
use memory::MemoryCollection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, warn};

/// Hands out named collections, persistent when a keyspace could be opened.
pub struct KeyValueStore {
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Keyspace>,
}

impl KeyValueStore {
    /// Opens the on-disk keyspace under `data_path/cache`. Failure to open it
    /// is logged and leaves the store memory-only.
    pub fn open(data_path: &Path) -> Self {
        let cache_dir = data_path.join("cache");
        let keyspace = match fjall::Config::new(&cache_dir).open() {
            Ok(keyspace) => Some(keyspace),
            Err(e) => {
                warn!(
                    "Could not open cache at {}: {}. Rates will not be persisted",
                    cache_dir.display(),
                    e
                );
                None
            }
        };

        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.keyspace.is_some()
    }

    /// Returns the collection called `name`, creating it on first use.
    ///
    /// With `persist` set the collection lives on disk if possible; otherwise,
    /// or if the partition cannot be opened, it is kept in memory.
    pub fn get_collection(&self, name: &str, persist: bool) -> Arc<dyn KeyValueCollection> {
        if let Some(existing) = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(existing);
        }

        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let collection = collections
            .entry(name.to_string())
            .or_insert_with(|| self.create_collection(name, persist));
        Arc::clone(collection)
    }

    fn create_collection(&self, name: &str, persist: bool) -> Arc<dyn KeyValueCollection> {
        if persist {
            if let Some(keyspace) = &self.keyspace {
                match DiskCollection::open(keyspace, name) {
                    Ok(collection) => {
                        debug!("Opened persistent collection: {}", name);
                        return Arc::new(collection);
                    }
                    Err(e) => warn!("{:#}, falling back to memory", e),
                }
            }
        }
        debug!("Created in-memory collection: {}", name);
        Arc::new(MemoryCollection::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_collections_are_shared_by_name() {
        let store = KeyValueStore::in_memory();
        assert!(!store.is_persistent());

        let first = store.get_collection("rates", true);
        first.put("k", "v".to_string()).await.unwrap();

        let second = store.get_collection("rates", true);
        assert_eq!(second.get("k").await.unwrap().as_deref(), Some("v"));

        let other = store.get_collection("other", false);
        assert!(other.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_on_disk() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path());
        assert!(store.is_persistent());
        assert!(dir.path().join("cache").exists());

        let collection = store.get_collection("rates", true);
        collection.put("k", "v".to_string()).await.unwrap();
        assert_eq!(collection.get("k").await.unwrap().as_deref(), Some("v"));
    }
}

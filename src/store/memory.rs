use crate::core::cache::KeyValueCollection;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory collection, used when no persistent store is available
#[derive(Default)]
pub struct MemoryCollection {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCollection for MemoryCollection {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.inner.lock().await;
        let value = entries.get(key).cloned();
        if value.is_some() {
            debug!("Cache HIT for key: {}", key);
        } else {
            debug!("Cache MISS for key: {}", key);
        }
        Ok(value)
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.inner.lock().await;
        debug!("Cache PUT for key: {}", key);
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.inner.lock().await;
        entries.remove(key);
        debug!("Cache REMOVE for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_get_put() {
        let collection = MemoryCollection::new();

        // Initially, collection is empty
        assert!(collection.get("key1").await.unwrap().is_none());

        collection.put("key1", "123".to_string()).await.unwrap();
        assert_eq!(collection.get("key1").await.unwrap().as_deref(), Some("123"));

        // Get a non-existent key
        assert!(collection.get("key2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_put_overwrites() {
        let collection = MemoryCollection::new();

        collection.put("key1", "old".to_string()).await.unwrap();
        collection.put("key1", "new".to_string()).await.unwrap();
        assert_eq!(collection.get("key1").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_memory_remove() {
        let collection = MemoryCollection::new();

        collection.put("key1", "123".to_string()).await.unwrap();
        collection.remove("key1").await.unwrap();
        assert!(collection.get("key1").await.unwrap().is_none());
    }
}

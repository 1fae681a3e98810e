use crate::core::cache::KeyValueCollection;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use tracing::debug;

/// A collection backed by a fjall partition.
pub struct DiskCollection {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn open(keyspace: &Keyspace, name: &str) -> Result<Self> {
        let partition = keyspace
            .open_partition(name, PartitionCreateOptions::default())
            .with_context(|| format!("Failed to open cache partition: {name}"))?;
        Ok(Self {
            keyspace: keyspace.clone(),
            partition,
        })
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.partition.get(key.as_bytes())? {
            Some(value) => {
                debug!("Cache HIT for key: {}", key);
                let text = String::from_utf8(value.to_vec())
                    .with_context(|| format!("Cached value for {key} is not valid UTF-8"))?;
                Ok(Some(text))
            }
            None => {
                debug!("Cache MISS for key: {}", key);
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.partition.insert(key.as_bytes(), value.as_bytes())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Cache PUT for key: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.partition.remove(key.as_bytes())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Cache REMOVE for key: {}", key);
        Ok(())
    }
}

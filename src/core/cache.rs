//! Key-value storage abstraction used to keep the last rate snapshot.

use anyhow::Result;
use async_trait::async_trait;

/// A named collection of string blobs, in the spirit of browser local storage.
///
/// Writes overwrite the previous value for a key. There is no expiry; callers
/// decide whether what they read back is still useful.
#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

//! On-device preference storage
//!
//! The app persists a single string (the pregnancy LMP date). Values are
//! postcard-encoded in a fjall keyspace; an in-memory store stands in for
//! tests and for runs without a writable data directory.

use anyhow::Context;
use async_trait::async_trait;
use fjall::Keyspace;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tokio::task;

use crate::{MamaeZenError, Result};

/// Key holding the last menstrual period date, `YYYY-MM-DD`
pub const LMP_KEY: &str = "mamaezen_lmp";

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

pub struct FjallPreferenceStore {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn storage_error(e: anyhow::Error) -> MamaeZenError {
    MamaeZenError::storage(format!("{e:#}"))
}

impl FjallPreferenceStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open = || -> anyhow::Result<Keyspace> {
            let db = fjall::Database::builder(path)
                .open()
                .with_context(|| format!("Failed to open preference database at {}", path.display()))?;
            Ok(db.keyspace("preferences", fjall::KeyspaceCreateOptions::default)?)
        };
        let store = open().map_err(storage_error)?;
        tracing::debug!("Preference store opened at {}", path.display());
        Ok(Self { store })
    }
}

#[async_trait]
impl PreferenceStore for FjallPreferenceStore {
    #[tracing::instrument(name = "query_preferences", level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes = task::spawn_blocking(move || get_from_store(store, key_bytes))
            .await
            .map_err(|e| MamaeZenError::storage(e.to_string()))?
            .map_err(storage_error)?;

        match maybe_bytes {
            Some(bytes) => {
                let value: String = postcard::from_bytes(&bytes)
                    .map_err(|e| MamaeZenError::storage(format!("Corrupt value for {key}: {e}")))?;
                Ok(Some(value))
            }
            None => {
                tracing::debug!("Key not found");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(name = "put_preferences", level = "debug", skip(self))]
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = postcard::to_stdvec(value)
            .map_err(|e| MamaeZenError::storage(format!("Failed to encode value: {e}")))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| MamaeZenError::storage(e.to_string()))?
            .map_err(|e| MamaeZenError::storage(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(|e| MamaeZenError::storage(e.to_string()))?
            .map_err(|e| MamaeZenError::storage(e.to_string()))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| MamaeZenError::storage("Preference map poisoned"))
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fjall_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FjallPreferenceStore::open(dir.path()).unwrap();
            assert_eq!(store.get(LMP_KEY).await.unwrap(), None);
            store.put(LMP_KEY, "2026-05-01").await.unwrap();
        }

        let store = FjallPreferenceStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get(LMP_KEY).await.unwrap().as_deref(),
            Some("2026-05-01")
        );

        store.remove(LMP_KEY).await.unwrap();
        assert_eq!(store.get(LMP_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryPreferenceStore::default();
        store.put(LMP_KEY, "2026-01-01").await.unwrap();
        store.put(LMP_KEY, "2026-02-01").await.unwrap();
        assert_eq!(
            store.get(LMP_KEY).await.unwrap().as_deref(),
            Some("2026-02-01")
        );
    }
}

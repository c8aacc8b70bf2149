//! Host configuration store seam
//!
//! The feature flag lives in the host's own document store. The core only
//! needs a read-only text lookup, so the host (or a test) implements
//! [`ConfigStore`] and hands it to the gate at construction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AttachResult;

/// Read-only text lookup into the host's configuration entries
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Text of the entry with `title`, or `None` when the entry does not exist
    async fn get_text(&self, title: &str) -> AttachResult<Option<String>>;
}

/// In-memory store, used by the CLI host and in tests
#[derive(Clone, Default)]
pub struct MemoryConfigStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single entry
    pub fn with_entry(title: impl Into<String>, text: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(title.into(), text.into());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub async fn set(&self, title: impl Into<String>, text: impl Into<String>) {
        let mut entries = self.entries.write().await;
        entries.insert(title.into(), text.into());
    }

    pub async fn remove(&self, title: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        entries.remove(title)
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get_text(&self, title: &str) -> AttachResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(title).cloned())
    }
}

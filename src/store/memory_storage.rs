//! Implements the `Storage` trait using an in-memory map.

use crate::store::Storage;
use crate::Result;
use std::collections::HashMap;

/// An implementation of the `Storage` trait that holds everything in memory. It also counts how
/// many times `set` has been called so that callers can check write-through behavior.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    /// Create a new `MemoryStorage` seeded with `data`.
    pub fn new(data: HashMap<String, String>) -> Self {
        Self { data, writes: 0 }
    }

    /// The number of times `set` has been called.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[tokio::test]
async fn test_memory_storage() {
    let mut seed = HashMap::new();
    seed.insert("a".to_string(), "1".to_string());
    let mut storage = MemoryStorage::new(seed);
    assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("1"));
    assert!(storage.get("b").await.unwrap().is_none());
    storage.set("b", "2").await.unwrap();
    assert_eq!(storage.get("b").await.unwrap().as_deref(), Some("2"));
    assert_eq!(storage.writes(), 1);
}

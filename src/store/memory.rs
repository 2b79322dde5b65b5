use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::store::{DocumentCollection, StoreError};

/// In-process document collection backed by a concurrent map.
#[derive(Default)]
pub struct MemoryCollection {
    docs: DashMap<String, Value>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn insert(&self, doc: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.docs.insert(id.clone(), doc);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.docs.get(id).map(|entry| entry.value().clone()))
    }

    async fn replace(&self, id: &str, doc: Value) -> Result<(), StoreError> {
        match self.docs.get_mut(id) {
            Some(mut entry) => {
                *entry.value_mut() = doc;
                Ok(())
            }
            None => Err(StoreError::Missing(id.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.docs.remove(id);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(self
            .docs
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }
}

use chrono::Utc;
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::JsonStore;
use crate::errors::{Result, SiteGenError};
use crate::wire::{CrudItem, RESERVED_ITEM_KEYS};

/// Generic item collection consumed by generated CRUD front-ends.
pub struct ItemStore {
    inner: JsonStore<CrudItem>,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { inner: JsonStore::new(path) }
    }

    pub async fn list(&self) -> Result<Vec<CrudItem>> {
        self.inner.load().await
    }

    /// Ids are millisecond timestamps, bumped past any id already taken.
    pub async fn create(&self, fields: Map<String, Value>) -> Result<CrudItem> {
        let now = Utc::now();
        self.inner
            .update(|items| {
                let mut stamp = now.timestamp_millis();
                while items.iter().any(|i| i.id == stamp.to_string()) {
                    stamp += 1;
                }
                let item = CrudItem {
                    id: stamp.to_string(),
                    fields: strip_reserved(fields),
                    created_at: now,
                    updated_at: None,
                };
                items.push(item.clone());
                Ok(item)
            })
            .await
    }

    /// Shallow merge of `fields` over the stored item; stamps `updatedAt`.
    pub async fn update(&self, id: &str, fields: Map<String, Value>) -> Result<CrudItem> {
        self.inner
            .update(|items| {
                let item = items
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or_else(|| SiteGenError::NotFound("Item not found".into()))?;
                item.merge_fields(fields);
                item.updated_at = Some(Utc::now());
                Ok(item.clone())
            })
            .await
    }

    /// Removing an unknown id is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.inner
            .update(|items| {
                items.retain(|i| i.id != id);
                Ok(())
            })
            .await
    }
}

fn strip_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_ITEM_KEYS {
        fields.remove(key);
    }
    fields
}

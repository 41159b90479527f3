//! In-memory stores for exercising the resolver and API without SQLite.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::models::{ReferenceItem, ReferenceKind, ReferencePatch};
use super::resolver::ReferenceStore;
use crate::errors::StoreError;

pub fn item(id: i64, name: &str) -> ReferenceItem {
    ReferenceItem {
        id,
        name: name.to_string(),
        label: name.to_lowercase(),
        thai_label: None,
        description: None,
        thai_description: None,
        color: None,
    }
}

/// Store backed by a map; kinds never `put` read as empty tables.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<ReferenceKind, Vec<ReferenceItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, kind: ReferenceKind, rows: Vec<ReferenceItem>) {
        self.rows.lock().unwrap().insert(kind, rows);
    }
}

#[async_trait]
impl ReferenceStore for MemoryStore {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn update(
        &self,
        kind: ReferenceKind,
        id: i64,
        patch: ReferencePatch,
    ) -> Result<Option<ReferenceItem>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows
            .get_mut(&kind)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == id))
        else {
            return Ok(None);
        };
        if let Some(label) = patch.label {
            row.label = label;
        }
        if patch.thai_label.is_some() {
            row.thai_label = patch.thai_label;
        }
        if patch.description.is_some() {
            row.description = patch.description;
        }
        if patch.thai_description.is_some() {
            row.thai_description = patch.thai_description;
        }
        if patch.color.is_some() {
            row.color = patch.color;
        }
        Ok(Some(row.clone()))
    }
}

/// Store whose every call fails as if the database were unreachable.
pub struct FailingStore;

#[async_trait]
impl ReferenceStore for FailingStore {
    async fn list(&self, _kind: ReferenceKind) -> Result<Vec<ReferenceItem>, StoreError> {
        Err(StoreError::Unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn update(
        &self,
        _kind: ReferenceKind,
        _id: i64,
        _patch: ReferencePatch,
    ) -> Result<Option<ReferenceItem>, StoreError> {
        Err(StoreError::Unavailable(anyhow::anyhow!("connection refused")))
    }
}

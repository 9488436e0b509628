use super::store::{assign_id, DocumentStore, FieldMatch};
use super::{Collection, StoreResult, ID_FIELD};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process document store.
///
/// Documents keep insertion order; an upsert of an existing id replaces the
/// document in place. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    async fn select<F>(&self, collection: Collection, predicate: F) -> Vec<Value>
    where
        F: Fn(&Value) -> bool,
    {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| predicate(d)).cloned().collect())
            .unwrap_or_default()
    }
}

fn document_id(doc: &Value) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

fn field_contains(doc: &Value, field: &str, needle_lower: &str) -> bool {
    doc.get(field)
        .and_then(Value::as_str)
        .map_or(false, |value| value.to_lowercase().contains(needle_lower))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        Ok(self.select(collection, |_| true).await)
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .select(collection, |doc| document_id(doc) == Some(id))
            .await
            .into_iter()
            .next())
    }

    async fn find_by_fields(
        &self,
        collection: Collection,
        matches: &[FieldMatch<'_>],
    ) -> StoreResult<Vec<Value>> {
        Ok(self
            .select(collection, |doc| {
                matches
                    .iter()
                    .all(|m| doc.get(m.field).and_then(Value::as_str) == Some(m.value))
            })
            .await)
    }

    async fn find_containing(
        &self,
        collection: Collection,
        fields: &[&str],
        term: &str,
    ) -> StoreResult<Vec<Value>> {
        let needle = term.to_lowercase();
        Ok(self
            .select(collection, |doc| {
                fields.iter().any(|field| field_contains(doc, field, &needle))
            })
            .await)
    }

    async fn save(&self, collection: Collection, document: Value) -> StoreResult<Value> {
        let (id, object) = assign_id(document)?;
        let document = Value::Object(object);

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        match docs.iter_mut().find(|doc| document_id(doc) == Some(id.as_str())) {
            Some(existing) => *existing = document.clone(),
            None => docs.push(document.clone()),
        }

        Ok(document)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|doc| document_id(doc) != Some(id));
        Ok(docs.len() != before)
    }

    async fn exists_by_id(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        Ok(self.find_by_id(collection, id).await?.is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

use super::{Document, DocumentStore, FieldMatch, StoreResult};
use crate::metrics::record_store_operation;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed access to the collection of `T`, converting between entities and
/// stored JSON documents.
pub struct DocumentRepository<T: Document> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Document> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Document> DocumentRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<T>> {
        let documents = observe::<T, _>("find_all", self.store.find_all(T::COLLECTION).await)?;
        decode_all(documents)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>> {
        observe::<T, _>("find_by_id", self.store.find_by_id(T::COLLECTION, id).await)?
            .map(decode)
            .transpose()
    }

    pub async fn find_by_fields(&self, matches: &[FieldMatch<'_>]) -> StoreResult<Vec<T>> {
        let documents = observe::<T, _>(
            "find_by_fields",
            self.store.find_by_fields(T::COLLECTION, matches).await,
        )?;
        decode_all(documents)
    }

    pub async fn find_containing(&self, fields: &[&str], term: &str) -> StoreResult<Vec<T>> {
        let documents = observe::<T, _>(
            "find_containing",
            self.store.find_containing(T::COLLECTION, fields, term).await,
        )?;
        decode_all(documents)
    }

    /// Upsert `entity`; the returned value carries the assigned id
    pub async fn save(&self, entity: &T) -> StoreResult<T> {
        let document = serde_json::to_value(entity)?;
        decode(observe::<T, _>(
            "save",
            self.store.save(T::COLLECTION, document).await,
        )?)
    }

    pub async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        observe::<T, _>("delete_by_id", self.store.delete_by_id(T::COLLECTION, id).await)
    }

    pub async fn exists_by_id(&self, id: &str) -> StoreResult<bool> {
        observe::<T, _>("exists_by_id", self.store.exists_by_id(T::COLLECTION, id).await)
    }
}

fn observe<T: Document, R>(operation: &str, result: StoreResult<R>) -> StoreResult<R> {
    record_store_operation(T::COLLECTION.name(), operation, result.is_ok());
    if let Err(err) = &result {
        tracing::warn!(collection = %T::COLLECTION, operation, error = %err, "document store call failed");
    }
    result
}

fn decode<T: Document>(document: Value) -> StoreResult<T> {
    Ok(serde_json::from_value(document)?)
}

fn decode_all<T: Document>(documents: Vec<Value>) -> StoreResult<Vec<T>> {
    documents.into_iter().map(decode).collect()
}

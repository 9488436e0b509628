use super::{Collection, StoreError, StoreResult, ID_FIELD};
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Exact string equality on one document field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    pub field: &'a str,
    pub value: &'a str,
}

impl<'a> FieldMatch<'a> {
    pub fn new(field: &'a str, value: &'a str) -> Self {
        Self { field, value }
    }
}

/// Collection-oriented document persistence.
///
/// Documents are JSON objects carrying their id under `_id`. Implementations
/// are shared process-wide behind an `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in the collection, in the store's natural order
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>>;

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>>;

    /// Documents whose fields equal every given value. No matches yields all documents.
    async fn find_by_fields(
        &self,
        collection: Collection,
        matches: &[FieldMatch<'_>],
    ) -> StoreResult<Vec<Value>>;

    /// Documents where any of `fields` contains `term`, ignoring case.
    ///
    /// Case folding is Unicode lowercase, not ASCII only. Backends agree for
    /// letters with a one-to-one lowercase mapping; context-dependent forms
    /// such as a word-final sigma may differ.
    async fn find_containing(
        &self,
        collection: Collection,
        fields: &[&str],
        term: &str,
    ) -> StoreResult<Vec<Value>>;

    /// Upsert. A document without `_id` gets a fresh one; the stored document is returned.
    async fn save(&self, collection: Collection, document: Value) -> StoreResult<Value>;

    /// Returns whether a document was removed
    async fn delete_by_id(&self, collection: Collection, id: &str) -> StoreResult<bool>;

    async fn exists_by_id(&self, collection: Collection, id: &str) -> StoreResult<bool>;

    /// Cheap round trip used by health checks
    async fn ping(&self) -> StoreResult<()>;
}

/// Ensure `document` is an object with a non-empty `_id`, generating one if needed.
/// Returns the id and the object.
pub(crate) fn assign_id(document: Value) -> StoreResult<(String, Map<String, Value>)> {
    let mut object = match document {
        Value::Object(object) => object,
        other => {
            return Err(StoreError::InvalidDocument(format!(
                "expected a JSON object, got {}",
                other
            )))
        }
    };

    let id = match object.get(ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::String(_)) | Some(Value::Null) | None => Uuid::new_v4().to_string(),
        Some(other) => {
            return Err(StoreError::InvalidDocument(format!(
                "document id must be a string, got {}",
                other
            )))
        }
    };

    object.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    Ok((id, object))
}

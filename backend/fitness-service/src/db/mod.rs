/// Database access layer
///
/// This module provides:
/// - `DocumentStore`: collection-oriented document persistence, backed by
///   PostgreSQL JSONB (`PgDocumentStore`) or process memory (`MemoryDocumentStore`)
/// - `DocumentRepository`: typed access to one collection
/// - Per-entity repositories for workout plans and posts
mod memory_store;
mod pg_store;
pub mod post_repo;
mod repository;
mod store;
pub mod workout_plan_repo;

pub use memory_store::MemoryDocumentStore;
pub use pg_store::PgDocumentStore;
pub use post_repo::PostRepository;
pub use repository::DocumentRepository;
pub use store::{DocumentStore, FieldMatch};
pub use workout_plan_repo::WorkoutPlanRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the document id inside every stored document
pub const ID_FIELD: &str = "_id";

/// Named document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    WorkoutPlans,
    Posts,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::WorkoutPlans => "workout_plans",
            Collection::Posts => "posts",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An entity persisted as a document in a single collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);
}

/// Errors raised by document stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

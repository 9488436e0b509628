use super::{DocumentRepository, DocumentStore, StoreResult};
use crate::models::Post;
use std::sync::Arc;

/// Queries over the `posts` collection
#[derive(Clone)]
pub struct PostRepository {
    documents: DocumentRepository<Post>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: DocumentRepository::new(store),
        }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Post>> {
        self.documents.find_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Post>> {
        self.documents.find_by_id(id).await
    }

    pub async fn save(&self, post: &Post) -> StoreResult<Post> {
        self.documents.save(post).await
    }

    pub async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        self.documents.delete_by_id(id).await
    }
}

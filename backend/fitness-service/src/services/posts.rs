/// Post service - handles post creation, retrieval, and management
use crate::db::{Document, DocumentStore, PostRepository};
use crate::error::Result;
use crate::models::Post;
use crate::storage::StoredMedia;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct PostService {
    repo: PostRepository,
}

impl PostService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: PostRepository::new(store),
        }
    }

    /// Create a post from form fields and already-stored media, stamping `createdAt`
    pub async fn create_with_media(
        &self,
        title: String,
        content: String,
        author: String,
        media: Vec<StoredMedia>,
    ) -> Result<Post> {
        let media_count = media.len();
        let mut post = Post::new(title, content, author)
            .with_media(media.into_iter().map(|m| (m.url, m.content_type)));
        post.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        let saved = self.repo.save(&post).await?;
        tracing::info!(post_id = ?saved.id(), media_count, "post created");
        Ok(saved)
    }

    pub async fn save_or_update(&self, post: &Post) -> Result<Post> {
        Ok(self.repo.save(post).await?)
    }

    /// Upsert under the path id; no existence check, so an unknown id creates the post
    pub async fn edit(&self, id: &str, mut post: Post) -> Result<Post> {
        post.set_id(id.to_string());
        self.save_or_update(&post).await
    }

    pub async fn list_all(&self) -> Result<Vec<Post>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self.repo.delete_by_id(id).await?;
        tracing::debug!(post_id = %id, removed, "post delete");
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.repo.find_by_id(id).await?)
    }
}

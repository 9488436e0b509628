use super::{DocumentRepository, DocumentStore, FieldMatch, StoreResult};
use crate::models::WorkoutPlan;
use std::sync::Arc;

/// Queries over the `workout_plans` collection
#[derive(Clone)]
pub struct WorkoutPlanRepository {
    documents: DocumentRepository<WorkoutPlan>,
}

impl WorkoutPlanRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: DocumentRepository::new(store),
        }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<WorkoutPlan>> {
        self.documents.find_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<WorkoutPlan>> {
        self.documents.find_by_id(id).await
    }

    pub async fn find_by_difficulty(&self, difficulty: &str) -> StoreResult<Vec<WorkoutPlan>> {
        self.documents
            .find_by_fields(&[FieldMatch::new(WorkoutPlan::FIELD_DIFFICULTY, difficulty)])
            .await
    }

    pub async fn find_by_focus(&self, focus: &str) -> StoreResult<Vec<WorkoutPlan>> {
        self.documents
            .find_by_fields(&[FieldMatch::new(WorkoutPlan::FIELD_FOCUS, focus)])
            .await
    }

    pub async fn find_by_difficulty_and_focus(
        &self,
        difficulty: &str,
        focus: &str,
    ) -> StoreResult<Vec<WorkoutPlan>> {
        self.documents
            .find_by_fields(&[
                FieldMatch::new(WorkoutPlan::FIELD_DIFFICULTY, difficulty),
                FieldMatch::new(WorkoutPlan::FIELD_FOCUS, focus),
            ])
            .await
    }

    /// Case-insensitive substring match on the title only
    pub async fn find_by_title_containing(&self, term: &str) -> StoreResult<Vec<WorkoutPlan>> {
        self.documents
            .find_containing(&[WorkoutPlan::FIELD_TITLE], term)
            .await
    }

    /// Case-insensitive substring match on title or description
    pub async fn search_by_title_or_description(
        &self,
        term: &str,
    ) -> StoreResult<Vec<WorkoutPlan>> {
        self.documents
            .find_containing(
                &[WorkoutPlan::FIELD_TITLE, WorkoutPlan::FIELD_DESCRIPTION],
                term,
            )
            .await
    }

    pub async fn save(&self, plan: &WorkoutPlan) -> StoreResult<WorkoutPlan> {
        self.documents.save(plan).await
    }

    pub async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        self.documents.delete_by_id(id).await
    }

    pub async fn exists_by_id(&self, id: &str) -> StoreResult<bool> {
        self.documents.exists_by_id(id).await
    }
}

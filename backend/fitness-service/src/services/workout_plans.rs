/// Workout plan service - plan storage, lookup, filtering and search
use crate::db::{Document, DocumentStore, WorkoutPlanRepository};
use crate::error::Result;
use crate::models::WorkoutPlan;
use std::sync::Arc;

#[derive(Clone)]
pub struct WorkoutPlanService {
    repo: WorkoutPlanRepository,
}

impl WorkoutPlanService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: WorkoutPlanRepository::new(store),
        }
    }

    /// Create or overwrite a plan; a plan without id gets one assigned
    pub async fn save_or_update(&self, plan: &WorkoutPlan) -> Result<WorkoutPlan> {
        let saved = self.repo.save(plan).await?;
        tracing::debug!(plan_id = ?saved.id(), "workout plan saved");
        Ok(saved)
    }

    /// Overwrite the plan stored under `id`, or `None` when there is no such plan.
    ///
    /// The path id wins over any id carried in the body.
    pub async fn update(&self, id: &str, mut plan: WorkoutPlan) -> Result<Option<WorkoutPlan>> {
        if !self.repo.exists_by_id(id).await? {
            tracing::debug!(plan_id = %id, "update skipped, plan not found");
            return Ok(None);
        }

        plan.set_id(id.to_string());
        self.save_or_update(&plan).await.map(Some)
    }

    pub async fn list_all(&self) -> Result<Vec<WorkoutPlan>> {
        Ok(self.repo.find_all().await?)
    }

    /// Exact-match filter on difficulty and/or focus.
    ///
    /// Missing or empty parameters are ignored; with neither this is `list_all`.
    pub async fn filter(
        &self,
        difficulty: Option<&str>,
        focus: Option<&str>,
    ) -> Result<Vec<WorkoutPlan>> {
        let plans = match (non_empty(difficulty), non_empty(focus)) {
            (Some(difficulty), Some(focus)) => {
                self.repo
                    .find_by_difficulty_and_focus(difficulty, focus)
                    .await?
            }
            (Some(difficulty), None) => self.repo.find_by_difficulty(difficulty).await?,
            (None, Some(focus)) => self.repo.find_by_focus(focus).await?,
            (None, None) => self.repo.find_all().await?,
        };
        Ok(plans)
    }

    /// Delete by id; deleting an unknown id is not an error
    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self.repo.delete_by_id(id).await?;
        tracing::debug!(plan_id = %id, removed, "workout plan delete");
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<WorkoutPlan>> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Case-insensitive substring search over title and description.
    /// A missing or empty term returns every plan; whitespace is searched for literally.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<WorkoutPlan>> {
        match non_empty(term) {
            Some(term) => Ok(self.repo.search_by_title_or_description(term).await?),
            None => self.list_all().await,
        }
    }

    /// Like `search`, restricted to titles
    pub async fn search_titles(&self, term: Option<&str>) -> Result<Vec<WorkoutPlan>> {
        match non_empty(term) {
            Some(term) => Ok(self.repo.find_by_title_containing(term).await?),
            None => self.list_all().await,
        }
    }

    pub async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.repo.exists_by_id(id).await?)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

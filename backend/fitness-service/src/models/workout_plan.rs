use crate::db::{Collection, Document};
use serde::{Deserialize, Serialize};

/// A workout plan document in the `workout_plans` collection.
///
/// `difficulty` is expected to be one of Beginner, Intermediate, Advanced or
/// All Levels, but any string is stored as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// An exercise embedded in a plan. Sets and reps stay textual ("3x12", "to failure").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl WorkoutPlan {
    /// Field names used by repository queries, matching the stored JSON keys
    pub const FIELD_TITLE: &'static str = "title";
    pub const FIELD_DESCRIPTION: &'static str = "description";
    pub const FIELD_DIFFICULTY: &'static str = "difficulty";
    pub const FIELD_FOCUS: &'static str = "focus";
}

impl Document for WorkoutPlan {
    const COLLECTION: Collection = Collection::WorkoutPlans;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Data models for fitness-service
///
/// This module defines structures for:
/// - WorkoutPlan: Training plans with embedded exercises
/// - Post: Social posts with optional media attachments
///
/// Field names follow the JSON shape the web client reads: camelCase, with
/// the document id exposed as `_id`.
pub mod post;
pub mod workout_plan;

pub use post::Post;
pub use workout_plan::{Exercise, WorkoutPlan};

/// Business logic layer for fitness-service
///
/// - Workout plan service: upsert, lookup, difficulty/focus filtering, search
/// - Post service: post creation with media, edits, lookup
pub mod posts;
pub mod workout_plans;

pub use posts::PostService;
pub use workout_plans::WorkoutPlanService;

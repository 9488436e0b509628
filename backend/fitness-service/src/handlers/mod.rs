/// HTTP handlers and route table for fitness-service
///
/// - Workout plans: upsert, list, filter, search, checked update, delete
/// - Posts: multipart create with media, edit, list, lookup, delete
/// - Health: summary, liveness, readiness
pub mod health;
pub mod posts;
pub mod workout_plans;

use crate::storage::{MediaStorage, UPLOADS_ROUTE};
use actix_web::web;

pub use health::{health_summary, liveness_check, readiness_summary, HealthState};
pub use posts::{delete_post, edit_post, get_all_posts, get_post, save_post_with_media};
pub use workout_plans::{
    delete_workout_plan, filter_workout_plans, get_all_workout_plans, get_workout_plan,
    save_workout_plan, search_workout_plans, update_workout_plan,
};

/// Register every route. Shared state (`WorkoutPlanService`, `PostService`,
/// `MediaStorage`, `HealthState`) must already be in app data.
pub fn configure(cfg: &mut web::ServiceConfig, storage: &MediaStorage) {
    cfg.route(
        "/metrics",
        web::get().to(crate::metrics::serve_metrics),
    )
    .route("/api/v1/health", web::get().to(health_summary))
    .route("/api/v1/health/ready", web::get().to(readiness_summary))
    .route("/api/v1/health/live", web::get().to(liveness_check))
    .service(
        web::scope("/api/v1/workout-plans")
            .route("/save", web::post().to(save_workout_plan))
            .route("/getAll", web::get().to(get_all_workout_plans))
            .route("/filter", web::get().to(filter_workout_plans))
            .route("/search", web::get().to(search_workout_plans))
            .route("/update/{id}", web::put().to(update_workout_plan))
            .route("/delete/{id}", web::delete().to(delete_workout_plan))
            .route("/get/{id}", web::get().to(get_workout_plan)),
    )
    .service(
        web::scope("/api/v1/posts")
            .route("/save-with-media", web::post().to(save_post_with_media))
            .route("/getAll", web::get().to(get_all_posts))
            .route("/edit/{id}", web::put().to(edit_post))
            .route("/delete/{id}", web::delete().to(delete_post))
            .route("/search/{id}", web::get().to(get_post)),
    )
    .service(actix_files::Files::new(UPLOADS_ROUTE, storage.dir()));
}

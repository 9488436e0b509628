/// Workout plan handlers - HTTP endpoints under `/api/v1/workout-plans`
use crate::error::Result;
use crate::models::WorkoutPlan;
use crate::services::WorkoutPlanService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub difficulty: Option<String>,
    pub focus: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    /// `title` restricts matching to titles; anything else searches title and description
    pub scope: Option<String>,
}

/// Create or overwrite a plan
/// POST /api/v1/workout-plans/save
pub async fn save_workout_plan(
    service: web::Data<WorkoutPlanService>,
    req: web::Json<WorkoutPlan>,
) -> Result<HttpResponse> {
    let saved = service.save_or_update(&req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(saved))
}

/// GET /api/v1/workout-plans/getAll
pub async fn get_all_workout_plans(
    service: web::Data<WorkoutPlanService>,
) -> Result<HttpResponse> {
    let plans = service.list_all().await?;
    Ok(HttpResponse::Ok().json(plans))
}

/// GET /api/v1/workout-plans/filter?difficulty=&focus=
pub async fn filter_workout_plans(
    service: web::Data<WorkoutPlanService>,
    query: web::Query<FilterParams>,
) -> Result<HttpResponse> {
    let plans = service
        .filter(query.difficulty.as_deref(), query.focus.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(plans))
}

/// GET /api/v1/workout-plans/search?term=&scope=
pub async fn search_workout_plans(
    service: web::Data<WorkoutPlanService>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let term = query.term.as_deref();
    let plans = match query.scope.as_deref() {
        Some("title") => service.search_titles(term).await?,
        _ => service.search(term).await?,
    };
    Ok(HttpResponse::Ok().json(plans))
}

/// Overwrite an existing plan; 404 with an empty body when the id is unknown
/// PUT /api/v1/workout-plans/update/{id}
pub async fn update_workout_plan(
    service: web::Data<WorkoutPlanService>,
    plan_id: web::Path<String>,
    req: web::Json<WorkoutPlan>,
) -> Result<HttpResponse> {
    match service.update(&plan_id, req.into_inner()).await? {
        Some(plan) => Ok(HttpResponse::Ok().json(plan)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// DELETE /api/v1/workout-plans/delete/{id}
pub async fn delete_workout_plan(
    service: web::Data<WorkoutPlanService>,
    plan_id: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&plan_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/workout-plans/get/{id}
pub async fn get_workout_plan(
    service: web::Data<WorkoutPlanService>,
    plan_id: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_by_id(&plan_id).await? {
        Some(plan) => Ok(HttpResponse::Ok().json(plan)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

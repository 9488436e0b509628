//! HTTP tests for `/api/v1/workout-plans`

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::TestContext;
use fitness_service::db::Collection;
use serde_json::{json, Value};

async fn save_plan<S, B>(app: &S, plan: Value) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/workout-plans/save")
        .set_json(plan)
        .to_request();
    test::call_and_read_body_json(app, req).await
}

fn titles(plans: &Value) -> Vec<&str> {
    plans
        .as_array()
        .expect("array response")
        .iter()
        .map(|p| p["title"].as_str().unwrap_or_default())
        .collect()
}

#[actix_web::test]
async fn save_assigns_id_and_returns_entity() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let saved = save_plan(
        &app,
        json!({
            "title": "Push Day",
            "difficulty": "Intermediate",
            "duration": "45 min",
            "focus": "Strength",
            "exercises": [{"name": "Bench Press", "sets": "4", "reps": "8"}]
        }),
    )
    .await;

    let id = saved["_id"].as_str().expect("id assigned");
    assert!(!id.is_empty());
    assert_eq!(saved["exercises"][0]["name"], "Bench Press");
    // absent optional fields are omitted
    assert!(saved.get("description").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/workout-plans/get/{}", id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, saved);
}

#[actix_web::test]
async fn save_with_existing_id_overwrites() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let first = save_plan(&app, json!({"title": "Old"})).await;
    let id = first["_id"].as_str().unwrap().to_string();
    let second = save_plan(&app, json!({"_id": id, "title": "New"})).await;
    assert_eq!(second["_id"], first["_id"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/getAll")
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&all), vec!["New"]);
}

#[actix_web::test]
async fn get_unknown_plan_is_404_with_empty_body() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/get/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_web::test]
async fn filter_combines_difficulty_and_focus() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    for (title, difficulty, focus) in [
        ("A", "Beginner", "Cardio"),
        ("B", "Beginner", "Strength"),
        ("C", "Advanced", "Strength"),
    ] {
        save_plan(
            &app,
            json!({"title": title, "difficulty": difficulty, "focus": focus}),
        )
        .await;
    }

    let cases = [
        ("?difficulty=Beginner&focus=Strength", vec!["B"]),
        ("?difficulty=Beginner", vec!["A", "B"]),
        ("?focus=Strength", vec!["B", "C"]),
        ("", vec!["A", "B", "C"]),
        ("?difficulty=&focus=Cardio", vec!["A"]),
        ("?difficulty=beginner", vec![]),
        ("?focus=All%20Levels", vec![]),
    ];

    for (query, expected) in cases {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/workout-plans/filter{}", query))
            .to_request();
        let plans: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(titles(&plans), expected, "query {:?}", query);
    }
}

#[actix_web::test]
async fn update_requires_existing_plan() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/workout-plans/update/missing")
        .set_json(json!({"title": "Ghost"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());
    assert_eq!(
        ctx.store.len(Collection::WorkoutPlans).await,
        0
    );

    let saved = save_plan(&app, json!({"title": "Leg Day", "focus": "Strength"})).await;
    let id = saved["_id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/workout-plans/update/{}", id))
        .set_json(json!({"_id": "something-else", "title": "Leg Day v2"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["_id"], id);
    assert_eq!(updated["title"], "Leg Day v2");
    // the body replaces the document wholesale
    assert!(updated.get("focus").is_none());
}

#[actix_web::test]
async fn delete_returns_no_content_even_when_absent() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let saved = save_plan(&app, json!({"title": "Temp"})).await;
    let id = saved["_id"].as_str().unwrap();

    for target in [id, "never-existed"] {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/workout-plans/delete/{}", target))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/workout-plans/get/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_unknown_plan_leaves_others_untouched() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    save_plan(&app, json!({"title": "Keep A"})).await;
    save_plan(&app, json!({"title": "Keep B"})).await;
    assert_eq!(ctx.store.len(Collection::WorkoutPlans).await, 2);

    let req = test::TestRequest::delete()
        .uri("/api/v1/workout-plans/delete/no-such-plan")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    assert_eq!(ctx.store.len(Collection::WorkoutPlans).await, 2);
    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/getAll")
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&all), vec!["Keep A", "Keep B"]);
}

#[actix_web::test]
async fn search_matches_title_or_description() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    save_plan(&app, json!({"title": "Core Crusher", "description": "abs"})).await;
    save_plan(&app, json!({"title": "Mobility", "description": "hips and CORE"})).await;
    save_plan(&app, json!({"title": "Sprints"})).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/search?term=core")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&found), vec!["Core Crusher", "Mobility"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/search?term=core&scope=title")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&found), vec!["Core Crusher"]);

    // regex metacharacters are matched literally
    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/search?term=.%2A")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert!(found.as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/search")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn responses_allow_any_origin() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/workout-plans/getAll")
        .insert_header(("Origin", "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[actix_web::test]
async fn health_endpoints_report_memory_store() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fitness-service");

    let req = test::TestRequest::get()
        .uri("/api/v1/health/ready")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["document_store"]["status"], "healthy");
    assert_eq!(body["checks"]["upload_dir"]["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/health/live").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["alive"], true);
}

#[actix_web::test]
async fn readiness_reports_missing_upload_dir_without_creating_it() {
    let ctx = TestContext::with_missing_uploads();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/health/ready")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["checks"]["document_store"]["status"], "healthy");
    assert_eq!(body["checks"]["upload_dir"]["status"], "unhealthy");
    assert!(!ctx.upload_dir().exists());
}

#[actix_web::test]
async fn readiness_leaves_no_files_in_upload_dir() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/health/ready")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(std::fs::read_dir(ctx.upload_dir()).unwrap().count(), 0);
}

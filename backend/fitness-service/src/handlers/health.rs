/// Health endpoints: summary, liveness and readiness
use crate::db::DocumentStore;
use crate::storage::MediaStorage;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub struct HealthState {
    store: Arc<dyn DocumentStore>,
    storage: MediaStorage,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    pub fn new(store: Arc<dyn DocumentStore>, storage: MediaStorage) -> Self {
        Self { store, storage }
    }

    async fn check_store(&self) -> Result<(), String> {
        self.store.ping().await.map_err(|e| e.to_string())
    }

    /// Readiness only observes the upload directory: it must already exist and
    /// accept a new file. The scratch file is removed again.
    async fn check_upload_dir(&self) -> Result<(), String> {
        let dir = self.storage.dir();
        let metadata = tokio::fs::metadata(dir)
            .await
            .map_err(|e| format!("{}: {}", dir.display(), e))?;
        if !metadata.is_dir() {
            return Err(format!("{} is not a directory", dir.display()));
        }

        let scratch = dir.join(format!(".ready-{}", Uuid::new_v4()));
        tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&scratch)
            .await
            .map_err(|e| format!("{} is not writable: {}", dir.display(), e))?;
        if let Err(e) = tokio::fs::remove_file(&scratch).await {
            tracing::warn!(path = %scratch.display(), error = %e, "Failed to remove readiness file");
        }
        Ok(())
    }
}

/// GET /api/v1/health
pub async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_store().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "fitness-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("Document store unavailable: {}", e),
            "service": "fitness-service"
        })),
    }
}

/// GET /api/v1/health/ready
pub async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut ready = true;

    let start = Instant::now();
    let store_result = state.check_store().await;
    let store_latency = Some(start.elapsed().as_millis() as u64);
    let store_check = match store_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "Document store ping successful".to_string(),
            latency_ms: store_latency,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("Document store ping failed: {}", e),
                latency_ms: store_latency,
            }
        }
    };
    checks.insert("document_store".to_string(), store_check);

    let upload_check = match state.check_upload_dir().await {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "Upload directory writable".to_string(),
            latency_ms: None,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("Upload directory unavailable: {}", e),
                latency_ms: None,
            }
        }
    };
    checks.insert("upload_dir".to_string(), upload_check);

    let status = if ready {
        ComponentStatus::Healthy
    } else {
        ComponentStatus::Unhealthy
    };

    let response = ReadinessResponse {
        ready,
        status,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// GET /api/v1/health/live
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

//! Shared fixtures for HTTP integration tests
//!
//! Builds the full route table over an in-memory document store and a
//! temporary upload directory, and assembles multipart bodies by hand.
#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use fitness_service::config::UploadConfig;
use fitness_service::db::{DocumentStore, MemoryDocumentStore};
use fitness_service::handlers::{self, HealthState};
use fitness_service::services::{PostService, WorkoutPlanService};
use fitness_service::storage::MediaStorage;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const BASE_URL: &str = "http://localhost:8081";

pub struct TestContext {
    pub store: Arc<MemoryDocumentStore>,
    pub storage: MediaStorage,
    _tmp: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = tmp.path().join("uploads");
        std::fs::create_dir_all(&dir).expect("create upload dir");
        Self::with_upload_dir(tmp, dir, 1024 * 1024)
    }

    /// Upload directory path is a regular file, so every upload fails
    pub fn with_unwritable_uploads() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"occupied").expect("write blocker");
        Self::with_upload_dir(tmp, blocker.join("uploads"), 1024 * 1024)
    }

    /// Upload directory is configured but never created
    pub fn with_missing_uploads() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = tmp.path().join("uploads");
        Self::with_upload_dir(tmp, dir, 1024 * 1024)
    }

    pub fn with_max_file_bytes(max_file_bytes: u64) -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = tmp.path().join("uploads");
        std::fs::create_dir_all(&dir).expect("create upload dir");
        Self::with_upload_dir(tmp, dir, max_file_bytes)
    }

    fn with_upload_dir(tmp: TempDir, dir: PathBuf, max_file_bytes: u64) -> Self {
        let storage = MediaStorage::new(&UploadConfig {
            dir,
            public_base_url: BASE_URL.to_string(),
            max_file_bytes,
        });
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
            storage,
            _tmp: tmp,
        }
    }

    pub fn upload_dir(&self) -> &std::path::Path {
        self.storage.dir()
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn DocumentStore> = self.store.clone();
        let storage = self.storage.clone();

        App::new()
            .app_data(web::Data::new(WorkoutPlanService::new(store.clone())))
            .app_data(web::Data::new(PostService::new(store.clone())))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(HealthState::new(store, self.storage.clone())))
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
            .configure(move |cfg| handlers::configure(cfg, &storage))
    }
}

/// Hand-built `multipart/form-data` body
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----fitness-test-boundary-7MA4YWxk".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(
        mut self,
        name: &str,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Self {
        let mut head = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            self.boundary, name, filename
        );
        if let Some(content_type) = content_type {
            head.push_str(&format!("Content-Type: {}\r\n", content_type));
        }
        head.push_str("\r\n");

        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

/// Path component of a media URL built against `BASE_URL`
pub fn url_path(url: &str) -> &str {
    url.strip_prefix(BASE_URL).expect("media url uses test base url")
}

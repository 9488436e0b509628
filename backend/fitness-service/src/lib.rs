/// Fitness Service Library
///
/// REST backend for workout plans and social posts with media uploads,
/// persisted in a document store.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: Workout plan, exercise and post documents
/// - `services`: Business logic layer
/// - `db`: Document store backends and repositories
/// - `storage`: Local-disk media storage
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};

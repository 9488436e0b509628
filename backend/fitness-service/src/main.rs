use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool as create_pg_pool, parse_env_optional, DbConfig as DbPoolConfig};
use fitness_service::config::{StoreBackend, StoreConfig};
use fitness_service::db::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use fitness_service::handlers::{self, HealthState};
use fitness_service::services::{PostService, WorkoutPlanService};
use fitness_service::storage::MediaStorage;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Open the configured document store once; every repository shares it.
async fn connect_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreBackend::Postgres => {
            let mut db_cfg = DbPoolConfig::from_env("fitness-service", &config.database_url);
            // DB_MAX_CONNECTIONS wins over DATABASE_MAX_CONNECTIONS
            if parse_env_optional::<u32>("DB_MAX_CONNECTIONS").is_none() {
                db_cfg.max_connections = config.max_connections;
            }
            db_cfg.log_config();

            let pool = create_pg_pool(db_cfg)
                .await
                .context("Failed to create database pool")?;
            tracing::info!("Connected to database via db-pool crate");

            let store = PgDocumentStore::new(pool);
            store
                .migrate()
                .await
                .context("Failed to run document store migrations")?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    Ok(())
}

/// Fitness Service
///
/// # Routes
///
/// - `/api/v1/workout-plans/*` - Save, list, filter, search, update, delete workout plans
/// - `/api/v1/posts/*` - Create posts with media, edit, list, look up, delete
/// - `/uploads/*` - Uploaded media files
/// - `/api/v1/health*`, `/metrics` - Operational endpoints
///
/// # Deployment
///
/// Runs on port 8081 by default (FITNESS_SERVICE_PORT). STORE_BACKEND selects
/// PostgreSQL (default) or the in-memory store.
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    // Load configuration
    let config = match fitness_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting fitness-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = match connect_store(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Document store initialization failed: {:#}", e);
            eprintln!("ERROR: Failed to initialize document store: {:#}", e);
            std::process::exit(1);
        }
    };

    let storage = MediaStorage::new(&config.uploads);
    storage.ensure_dir().await.map_err(|e| {
        io::Error::new(
            e.kind(),
            format!(
                "Failed to create upload directory {}: {}",
                storage.dir().display(),
                e
            ),
        )
    })?;
    tracing::info!(
        dir = %storage.dir().display(),
        base_url = %config.uploads.public_base_url,
        "Media uploads enabled"
    );

    let workout_plans = web::Data::new(WorkoutPlanService::new(store.clone()));
    let posts = web::Data::new(PostService::new(store.clone()));
    let storage_data = web::Data::new(storage.clone());
    let health_state = web::Data::new(HealthState::new(store.clone(), storage.clone()));

    let http_bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let cors_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in cors_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(workout_plans.clone())
            .app_data(posts.clone())
            .app_data(storage_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(|cfg| handlers::configure(cfg, &storage))
    })
    .bind(&http_bind_address)?
    .workers(config.app.workers)
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let result = tokio::select! {
        joined = &mut server_task => {
            match joined {
                Ok(result) => result,
                Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
            }
        }
        signal = shutdown_signal() => {
            match &signal {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
            }
            server_handle.stop(true).await;
            match server_task.await {
                Ok(result) => signal.and(result),
                Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
            }
        }
    };

    tracing::info!("Fitness-service shutting down");
    result
}

//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, the background task coordinator,
//! and the Axum server lifecycle including graceful shutdown.

use crate::config::{CacheBackend, Config};
use crate::domain::task_coordinator::TaskCoordinator;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Cache backend (Redis, in-memory, or NullCache)
/// - Background task coordinator
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections, then waits up to
/// the task timeout for outstanding background tasks.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = build_cache(&config).await;

    let tasks =
        TaskCoordinator::new(config.task_timeout()).with_wait_mode(config.wait_for_background_tasks);

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let state = AppState::new(repository, cache, tasks.clone(), config.link_settings());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!(
        outstanding = tasks.outstanding(),
        "Server stopped, draining background tasks"
    );
    if !tasks.wait_idle_timeout(config.task_timeout()).await {
        tracing::warn!(
            outstanding = tasks.outstanding(),
            "Background tasks still running at shutdown"
        );
    }

    Ok(())
}

/// Builds the PostgreSQL pool from the configured pool settings.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Selects the cache backend, falling back to NullCache if Redis is unreachable.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    match (config.cache_backend, &config.redis_url) {
        (CacheBackend::Redis, Some(redis_url)) => match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        },
        (CacheBackend::Memory, _) => {
            tracing::info!("Cache enabled (in-memory)");
            Arc::new(MemoryCache::new())
        }
        _ => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

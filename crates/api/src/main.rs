use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use skintone_core::catalog::ShadeCatalog;
use skintone_core::store::{MemoryShadeStore, ShadeStore, TimedStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skintone_api::auth::JwtAuthorizer;
use skintone_api::config::ServerConfig;
use skintone_api::router::build_app_router;
use skintone_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "skintone_api=debug,skintone_core=debug,skintone_db=debug,tower_http=debug".into()
    });
    if config.log_json {
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
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Shade store ---
    let store = match &config.database_url {
        Some(database_url) => {
            let pool = skintone_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            skintone_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            skintone_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            bounded(skintone_db::PgShadeStore::new(pool), config.store_timeout_secs)
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set, using the in-memory shade store (data is lost on exit)"
            );
            bounded(MemoryShadeStore::new(), config.store_timeout_secs)
        }
    };

    // --- App state ---
    let state = AppState {
        catalog: ShadeCatalog::with_chunk_size(store, config.bulk_chunk_size),
        authorizer: Arc::new(JwtAuthorizer::new(config.jwt.clone())),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wrap `store` in a per-call timeout unless `secs` is zero.
fn bounded<S: ShadeStore + 'static>(store: S, secs: u64) -> Arc<dyn ShadeStore> {
    if secs == 0 {
        return Arc::new(store);
    }
    Arc::new(TimedStore::new(store, Duration::from_secs(secs)))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

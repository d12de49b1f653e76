//! Character Keeper server entry point.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load `.env` and configuration; configuration errors are fatal
//! 3. Connect the backing engine (before serving any traffic)
//! 4. Build the fetch proxy client
//! 5. Create Axum router with all endpoints
//! 6. Serve until SIGINT/SIGTERM, then shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use character_keeper::api::{create_router, AppState, CorsPolicy};
use character_keeper::backend::{KvBackend, MemoryBackend, RedisBackend};
use character_keeper::config::{BackendTarget, Config};
use character_keeper::proxy::FetchProxy;
use character_keeper::store::DocumentStore;
use character_keeper::spawn_cleanup_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "character_keeper=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Character Keeper");

    if dotenv::dotenv().is_err() {
        info!("No .env file found, using environment variables");
    }

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: port={}, origins={:?}, fetch_timeout={:?}, strict_delete={}",
        config.server_port, config.allowed_origins, config.fetch_timeout, config.strict_delete
    );

    let mut cleanup_handle = None;
    let backend: Arc<dyn KvBackend> = match &config.backend {
        BackendTarget::Redis(url) => Arc::new(
            RedisBackend::connect(url)
                .await
                .context("failed to connect to Redis")?,
        ),
        BackendTarget::Memory => {
            warn!("Using in-process backend; documents will not survive a restart");
            let memory = Arc::new(MemoryBackend::new());
            cleanup_handle = Some(spawn_cleanup_task(memory.clone(), config.cleanup_interval));
            memory
        }
    };

    let proxy = FetchProxy::new(config.fetch_timeout).context("failed to build HTTP client")?;

    let state = AppState::new(DocumentStore::new(backend), proxy)
        .with_cors(CorsPolicy::new(&config.allowed_origins))
        .with_strict_delete(config.strict_delete)
        .with_body_limit(config.max_body_bytes);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops background tasks.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweep task aborted");
    }
}

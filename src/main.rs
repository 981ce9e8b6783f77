//! Brewery API - A cached brewery directory service
//!
//! Serves Open Brewery DB data through a filterable, sortable, paginated
//! endpoint, backed by a TTL cache with single-flight refresh.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brewery_api::api::create_router;
use brewery_api::{spawn_refresh_task, AppState, Config, OpenBreweryClient};

/// Main entry point for the brewery API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create upstream client, cache and service
/// 4. Warm the cache once (failure is logged, not fatal)
/// 5. Start background pre-warm task if configured
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brewery_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Brewery API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, page_size={}, cache_ttl={}s, stale_on_error={}, port={}, warm_interval={}s",
        config.upstream_base_url,
        config.upstream_page_size,
        config.cache_ttl,
        config.serve_stale_on_error,
        config.server_port,
        config.warm_interval
    );

    let client = OpenBreweryClient::from_config(&config).context("building upstream client")?;
    let state = AppState::from_config(Arc::new(client), &config);
    let cache = state.cache();

    match cache.force_refresh().await {
        Ok(count) => info!("Cache warmed with {} breweries", count),
        Err(e) => warn!(error = %e, "Initial cache warm failed, will fetch on first request"),
    }

    let refresh_handle = (config.warm_interval > 0).then(|| {
        info!("Background pre-warm task started");
        spawn_refresh_task(cache.clone(), Duration::from_secs(config.warm_interval))
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(refresh_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the pre-warm task and allows graceful shutdown.
async fn shutdown_signal(refresh_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    if let Some(handle) = refresh_handle {
        handle.abort();
        warn!("Pre-warm task aborted");
    }
}

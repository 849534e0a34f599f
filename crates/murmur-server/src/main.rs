mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use murmur_api::admin::provision_admin;
use murmur_api::auth::{AppState, AppStateInner};
use murmur_api::routes;
use murmur_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murmur=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Load state
    let db = if config.amnesia {
        info!("Amnesia mode: storage will not be read or written");
        Database::in_memory()
    } else {
        Database::load(&config.storage_path)
    };

    if let Some(token) = config.admin_token.as_deref() {
        provision_admin(&db, token)?;
    } else {
        info!("Admin commands disabled (MURMUR_ADMIN_TOKEN unset)");
    }

    let state: AppState = Arc::new(AppStateInner::new(db, config.admin_token.clone()));

    let app = routes::router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Murmur server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    finish(served, &state.db, &config)
}

/// Persist once, after the listener has stopped accepting requests,
/// whether or not serving ended cleanly. A serve error is reported after
/// the save.
fn finish(served: std::io::Result<()>, db: &Database, config: &Config) -> anyhow::Result<()> {
    if let Err(e) = &served {
        error!("Server stopped with an error: {}", e);
    }

    if !config.amnesia {
        if let Err(e) = db.save(&config.storage_path) {
            error!("Failed to save data to {}: {}", config.storage_path.display(), e);
            return Err(e.into());
        }
    }

    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}

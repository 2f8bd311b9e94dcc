use anyhow::{Context, Result};
use axum::Router;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::app::LearnApp;
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;
use crate::server::api;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub app: LearnApp,
}

impl AppState {
    pub fn new(app: LearnApp) -> Self {
        Self {
            metrics_state: MetricsState::new(get_metrics().registry.clone()),
            app,
        }
    }
}

/// Application routes plus the metrics route when enabled.
pub fn router(settings_config: &SettingsConfig, app: LearnApp) -> Router {
    let state = AppState::new(app);
    Router::new()
        .merge(state.metrics_state.router(&settings_config.metrics))
        .merge(api::router())
        .with_state(state)
}

/// Serve the app until the listener fails.
pub async fn start(settings_config: &SettingsConfig, app: LearnApp) -> Result<()> {
    let app_router = router(settings_config, app);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);
    get_metrics().up.set(1);
    axum::serve(listener, app_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    get_metrics().up.set(0);
    info!("server stopped");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(sigint) => sigint,
        Err(err) => {
            error!("failed to install SIGINT handler: {}", err);
            return std::future::pending().await;
        }
    };
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            error!("failed to install SIGTERM handler: {}", err);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigint.recv() => info!("SIGINT received, shutting down"),
        _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
    }
}

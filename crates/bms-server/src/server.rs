use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Back-office HTTP server.
pub struct BmsServer {
    config: ServerConfig,
}

impl BmsServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(AppState::from_config(&self.config)?))
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("bms server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

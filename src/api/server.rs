//! Analytics service server

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use super::auth::ServiceAuth;
use super::router::{AppState, create_router};
use crate::config::Config;
use crate::{Error, Result};

/// Analytics HTTP server
pub struct Server {
    /// Configuration
    config: Config,
}

impl Server {
    /// Create a new server from loaded configuration
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::new(
            self.config
                .server
                .host
                .parse()
                .map_err(|e| Error::Config(format!("Invalid host: {e}")))?,
            self.config.server.port,
        );

        let auth = ServiceAuth::from_config(&self.config.auth);
        if auth.is_configured() {
            info!("Service token configured - protected routes enabled");
        } else {
            // Misconfiguration is surfaced per request, not at startup:
            // /health must keep serving and protected routes answer 500.
            warn!(
                "Service token unset, empty, or a placeholder - protected routes will answer 500"
            );
        }

        let state = Arc::new(AppState { auth });
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;
        info!(
            version = env!("CARGO_PKG_VERSION"),
            host = %self.config.server.host,
            port = self.config.server.port,
            "Listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

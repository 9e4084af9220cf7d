//! HTTP module

use std::time::Duration;

use anyhow::Result;
use axum::async_trait;
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tracing::debug;

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod open_api;
pub mod servers;
pub mod state;

/// Configuration for the HTTP servers.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The HTTP (redirect) port to listen on
    #[arg(long, env = "HTTP_PORT", default_value = "3000")]
    pub http_port: u16,

    /// The HTTPS port to listen on
    #[arg(long, env = "HTTPS_PORT", default_value = "3443")]
    pub https_port: u16,

    /// The base URL of the application
    #[arg(long, env = "BASE_URL", default_value = "https://localhost:3443")]
    pub base_url: String,

    /// Path to the TLS certificate
    #[arg(long, env = "TLS_CERT_PATH")]
    pub cert_path: String,

    /// Path to the TLS private key
    #[arg(long, env = "TLS_KEY_PATH")]
    pub key_path: String,
}

/// A runnable server
#[async_trait]
pub trait Server {
    /// Runs the server until shutdown
    async fn run(self) -> Result<()>;
}

#[mutants::skip]
pub(crate) async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}

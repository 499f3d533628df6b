//! Startup orchestration.
//!
//! # Order
//! 1. Bind the intake listener (fail fast)
//! 2. Build the server and its worker registry
//! 3. Serve until a shutdown signal, then abort workers

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::LoadgenConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_shutdown_signal;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind the configured address.
pub async fn bind(config: &LoadgenConfig) -> Result<(TcpListener, SocketAddr), StartupError> {
    let address = &config.listener.bind_address;
    let bind_err = |source| StartupError::Bind {
        address: address.clone(),
        source,
    };

    let listener = TcpListener::bind(address).await.map_err(bind_err)?;
    let local_addr = listener.local_addr().map_err(bind_err)?;
    Ok((listener, local_addr))
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: LoadgenConfig) -> Result<(), StartupError> {
    let (listener, local_addr) = bind(&config).await?;
    tracing::info!(address = %local_addr, "Listening for jobs");

    let server = HttpServer::new(&config);
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let serve = tokio::spawn(server.run(listener, server_shutdown));

    wait_for_shutdown_signal().await;
    shutdown.trigger();

    match serve.await {
        Ok(result) => result?,
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    }
    Ok(())
}

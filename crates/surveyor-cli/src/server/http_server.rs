//! HTTP server lifecycle.

use std::future::IntoFuture;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::{Result, ServerError, shutdown_signal};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Starts an HTTP server with graceful shutdown.
///
/// After a shutdown signal, in-flight requests get the configured shutdown
/// timeout to complete before the server stops waiting for them.
pub async fn serve_http(app: Router, config: &ServerConfig) -> Result<()> {
    let server_addr = config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|source| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %source,
            "failed to bind to address"
        );

        ServerError::Bind {
            address: server_addr.to_string(),
            source,
        }
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server is bound to all interfaces, ensure firewall rules are properly configured"
        );
    }

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let graceful = async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    let shutdown_timeout = config.shutdown_timeout();
    let deadline = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(shutdown_timeout).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %err,
                    "server encountered an error"
                );
                ServerError::Runtime(err)
            })?;

            tracing::info!(target: TRACING_TARGET_SERVER_SHUTDOWN, "server shut down gracefully");
        }
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "graceful shutdown timed out, dropping open connections"
            );
        }
    }

    Ok(())
}

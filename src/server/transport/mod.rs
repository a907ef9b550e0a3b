//! Transports that bind `QrCodeServer` instances to clients.
//!
//! A transport is chosen once at startup. Stdio keeps one instance for the process;
//! HTTP and serverless create a fresh instance per request.
use std::future::Future;

use tracing::info;

use crate::server::runtime::{RuntimeExit, ServerFactory};

pub mod http;
pub mod oneshot;
pub mod serverless;
pub mod stdio;

pub use http::{http_router, HttpTransport, McpEndpoint, HEALTH_PATH, MCP_PATH};
pub use serverless::{ServerlessEntry, ServerlessTransport, API_MCP_PATH, RUNTIME_API_ENV};
pub use stdio::StdioTransport;

/// A transport that owns the process lifecycle.
pub trait Transport {
    fn name(&self) -> &'static str;

    /// Serve until the client goes away or a termination signal arrives.
    fn serve(self, factory: ServerFactory) -> impl Future<Output = Result<(), RuntimeExit>> + Send;
}

/// Run `transport` to completion.
pub async fn serve_with<T: Transport>(transport: T, factory: ServerFactory) -> Result<(), RuntimeExit> {
    info!(
        target: "qrcode_mcp::runtime",
        transport = transport.name(),
        "Starting transport"
    );
    transport.serve(factory).await
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(target: "qrcode_mcp::runtime", error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(target: "qrcode_mcp::runtime", error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "qrcode_mcp::runtime", "Shutting down...");
}

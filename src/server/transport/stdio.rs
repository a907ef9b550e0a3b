use rmcp::ServiceExt;
use tracing::info;

use super::{shutdown_signal, Transport};
use crate::server::runtime::{RuntimeExit, ServerFactory};

/// One server instance over stdin/stdout for the process lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioTransport;

impl Transport for StdioTransport {
    fn name(&self) -> &'static str {
        "stdio"
    }

    async fn serve(self, factory: ServerFactory) -> Result<(), RuntimeExit> {
        let running = factory
            .create()
            .serve(rmcp::transport::stdio())
            .await
            .map_err(RuntimeExit::from_error)?;
        info!(
            target: "qrcode_mcp::runtime",
            "QR Code Generator MCP Server running on stdio"
        );

        let cancel = running.cancellation_token();
        let signal_task = tokio::spawn(async move {
            shutdown_signal().await;
            cancel.cancel();
        });

        let quit_reason = running.waiting().await;
        signal_task.abort();
        let quit_reason = quit_reason.map_err(RuntimeExit::from_error)?;
        info!(
            target: "qrcode_mcp::runtime",
            reason = ?quit_reason,
            "Stdio session closed"
        );
        Ok(())
    }
}

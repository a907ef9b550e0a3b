use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, ErrorData, Implementation, ListResourcesResult, PaginatedRequestParam,
        ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, RoleServer,
};
use tracing::debug;
use uuid::Uuid;

use super::{
    factory::{InstanceLifecycle, ServerSettings},
    server_info::SERVER_NAME,
};
use crate::{
    resources::resource_error_to_error_data,
    server::config::ToolVariant,
    tools::{
        self,
        qrcode::{self, EncodeTextRequest, GenerateQrCodeRequest},
        ServerToolRouter,
    },
};

/// One MCP server instance: the `generate_qrcode` tool plus the UI resource.
///
/// Holds no per-call state; every invocation is independent.
#[derive(Clone)]
pub struct QrCodeServer {
    settings: Arc<ServerSettings>,
    tool_router: ServerToolRouter<Self>,
    lifecycle: Arc<InstanceLifecycle>,
}

impl QrCodeServer {
    pub(super) fn new(settings: Arc<ServerSettings>, lifecycle: Arc<InstanceLifecycle>) -> Self {
        let router = match settings.variant {
            ToolVariant::Typed => tools::build_router(Self::typed_tool_router),
            ToolVariant::Text => tools::build_router(Self::text_tool_router),
        };
        Self {
            settings,
            tool_router: router,
            lifecycle,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.lifecycle.instance_id()
    }
}

#[tool_router(router = typed_tool_router)]
impl QrCodeServer {
    #[tool(
        name = "generate_qrcode",
        title = "Generate QR Code",
        description = "Generate a QR code for various types of content including URLs, plain text, email addresses, phone numbers, SMS, WiFi credentials, and vCards. Returns an interactive UI for displaying and downloading the QR code."
    )]
    async fn generate_qrcode(
        &self,
        Parameters(request): Parameters<GenerateQrCodeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        request
            .validate()
            .map_err(qrcode::validation_error_to_error_data)?;

        let payload = qrcode::format_payload(&request);
        debug!(
            target: "qrcode_mcp::tools",
            instance_id = %self.instance_id(),
            kind = request.kind.as_str(),
            "Formatted QR code payload"
        );
        qrcode::typed_tool_result(&request, &payload, self.settings.ui.uri())
    }
}

#[tool_router(router = text_tool_router)]
impl QrCodeServer {
    #[tool(
        name = "generate_qrcode",
        title = "Generate QR Code",
        description = "Generate a QR code from text, URL, phone number, or any string"
    )]
    async fn generate_qrcode_from_text(
        &self,
        Parameters(request): Parameters<EncodeTextRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        request
            .validate()
            .map_err(qrcode::validation_error_to_error_data)?;
        qrcode::text_tool_result(&request.text, self.settings.ui.uri())
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for QrCodeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::default()
            },
            instructions: Some(self.settings.instructions.clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(vec![self
            .settings
            .ui
            .descriptor()]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.settings.ui.read(&request.uri).await.map_err(|err| {
            tracing::error!(
                target: "qrcode_mcp::resources",
                instance_id = %self.instance_id(),
                reason = %err,
                "Failed to serve UI resource"
            );
            resource_error_to_error_data(err)
        })
    }
}

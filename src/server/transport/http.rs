//! Stateless streamable-HTTP transport.
//!
//! Every MCP request gets its own `QrCodeServer`; the instance is released before
//! the response is returned.
use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{
    oneshot::{self, Inbound},
    shutdown_signal, Transport,
};
use crate::server::{
    config::ServerSection,
    runtime::{RuntimeExit, ServerFactory, SERVICE_TITLE},
};

pub const MCP_PATH: &str = "/mcp";
pub const HEALTH_PATH: &str = "/health";

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Accept";

/// Listens on `host:port` until SIGINT/SIGTERM.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    section: ServerSection,
}

impl HttpTransport {
    pub fn new(section: ServerSection) -> Self {
        Self { section }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.section.host, self.section.port)
    }
}

impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn serve(self, factory: ServerFactory) -> Result<(), RuntimeExit> {
        let addr = self.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind HTTP listener on {addr}"))
            .map_err(RuntimeExit::from_error)?;

        let port = self.section.port;
        info!(target: "qrcode_mcp::runtime", "QR Code Generator MCP Server running on port {port}");
        info!(target: "qrcode_mcp::runtime", "Health check: http://localhost:{port}{HEALTH_PATH}");
        info!(target: "qrcode_mcp::runtime", "MCP endpoint: http://localhost:{port}{MCP_PATH}");

        axum::serve(listener, http_router(factory))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated unexpectedly")
            .map_err(RuntimeExit::from_error)
    }
}

/// Service descriptor returned from `/`.
#[derive(Debug, Serialize)]
struct ServiceDescriptor {
    name: &'static str,
    version: &'static str,
    status: &'static str,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
    mcp: &'static str,
    health: &'static str,
}

/// Full router for the standalone HTTP server.
pub fn http_router(factory: ServerFactory) -> Router {
    Router::new()
        .route("/", get(describe_service))
        .route(HEALTH_PATH, get(health_check))
        .layer(CorsLayer::permissive())
        .merge(mcp_routes(factory, &[MCP_PATH]))
        .layer(TraceLayer::new_for_http())
}

async fn describe_service() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        name: SERVICE_TITLE,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        endpoints: Endpoints {
            mcp: MCP_PATH,
            health: HEALTH_PATH,
        },
    })
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Routes serving the MCP endpoint at each of `paths`.
///
/// `OPTIONS` is answered by `preflight`; keep `CorsLayer` off these routes.
pub(crate) fn mcp_routes(factory: ServerFactory, paths: &[&str]) -> Router {
    let endpoint = McpEndpoint::new(factory);
    let router = paths.iter().fold(Router::new(), |router, path| {
        router.route(
            path,
            post(dispatch)
                .get(reject_stream)
                .delete(reject_session_termination)
                .options(preflight),
        )
    });
    router
        .with_state(endpoint)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}

/// Stateless MCP endpoint: one `QrCodeServer` per JSON-RPC request.
#[derive(Clone)]
pub struct McpEndpoint {
    factory: ServerFactory,
}

impl McpEndpoint {
    pub fn new(factory: ServerFactory) -> Self {
        Self { factory }
    }

    /// Answer one POSTed JSON-RPC message.
    ///
    /// Requests are answered with `application/json`. Notifications and client
    /// responses are acknowledged with 202 and never reach an instance.
    pub async fn handle_message(&self, headers: &HeaderMap, body: &[u8]) -> Response {
        if !accepts_json(headers) {
            return json_rpc_error(
                StatusCode::NOT_ACCEPTABLE,
                -32600,
                "Not Acceptable: client must accept application/json",
            );
        }
        if !is_json_content(headers) {
            return json_rpc_error(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                -32600,
                "Unsupported Media Type: Content-Type must be application/json",
            );
        }
        let message: Value = match serde_json::from_slice(body) {
            Ok(message) => message,
            Err(err) => {
                return json_rpc_error(StatusCode::BAD_REQUEST, -32700, &format!("Parse error: {err}"))
            }
        };
        match Inbound::classify(&message) {
            Some(Inbound::Request { id }) => {
                match oneshot::answer_request(&self.factory, &message, &id).await {
                    Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
                    Err(err) => {
                        error!(target: "qrcode_mcp::transport", "MCP request failed inside the transport: {err}");
                        internal_error_response()
                    }
                }
            }
            Some(Inbound::Notification | Inbound::Response) => StatusCode::ACCEPTED.into_response(),
            None => json_rpc_error(
                StatusCode::BAD_REQUEST,
                -32600,
                "Invalid Request: expected a single JSON-RPC 2.0 message",
            ),
        }
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("application/json") || value.contains("*/*"))
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

async fn dispatch(
    State(endpoint): State<McpEndpoint>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        target: "qrcode_mcp::transport",
        "mcp_request",
        %request_id,
        path = %uri.path(),
    );
    endpoint
        .handle_message(&headers, &body)
        .instrument(span)
        .await
}

async fn reject_stream() -> Response {
    warn!(
        target: "qrcode_mcp::transport",
        "Rejected GET on the MCP endpoint"
    );
    method_not_allowed("Server-initiated streams not supported in stateless mode")
}

async fn reject_session_termination() -> Response {
    warn!(
        target: "qrcode_mcp::transport",
        "Rejected DELETE on the MCP endpoint"
    );
    method_not_allowed("Session termination not supported in stateless mode")
}

fn method_not_allowed(message: &str) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS))],
        Json(json!({ "error": message })),
    )
        .into_response()
}

async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            ),
        ],
    )
        .into_response()
}

/// JSON-RPC internal error body sent in place of a bare 500.
pub(crate) fn internal_error_response() -> Response {
    json_rpc_error(StatusCode::INTERNAL_SERVER_ERROR, -32603, "Internal server error")
}

fn json_rpc_error(status: StatusCode, code: i64, message: &str) -> Response {
    (
        status,
        Json(json!({
            "jsonrpc": "2.0",
            "error": { "code": code, "message": message },
            "id": null
        })),
    )
        .into_response()
}

//! Entry point for serverless hosts that hand over one HTTP request at a time.
use std::{
    convert::Infallible,
    env, io,
    path::PathBuf,
    task::{Context, Poll},
};

use anyhow::anyhow;
use axum::{extract::Request, response::Response, Router};
use tower::{Service, ServiceExt};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    http::{mcp_routes, MCP_PATH},
    Transport,
};
use crate::{
    lib::paths::ExecutionContext,
    server::{
        config::ServerConfig,
        runtime::{RuntimeExit, ServerFactory, ServerSettings},
    },
};

/// Rewritten path some platforms route to the MCP endpoint.
pub const API_MCP_PATH: &str = "/api/mcp";

/// Set by the function host; names the runtime API endpoint invocations come from.
pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

/// Pulls invocations from the platform runtime API and answers each through
/// [`ServerlessEntry`]. Never binds a socket.
#[derive(Debug, Clone)]
pub struct ServerlessTransport {
    runtime_api: Option<String>,
}

impl ServerlessTransport {
    pub fn new(runtime_api: Option<String>) -> Self {
        Self { runtime_api }
    }

    pub fn from_env() -> Self {
        Self::new(env::var(RUNTIME_API_ENV).ok().filter(|value| !value.is_empty()))
    }
}

impl Transport for ServerlessTransport {
    fn name(&self) -> &'static str {
        "serverless"
    }

    async fn serve(self, factory: ServerFactory) -> Result<(), RuntimeExit> {
        let Some(runtime_api) = self.runtime_api else {
            return Err(RuntimeExit::missing_runtime_api());
        };
        info!(
            target: "qrcode_mcp::runtime",
            %runtime_api,
            "Serving MCP invocations from the platform runtime API"
        );
        lambda_http::run(ServerlessEntry::new(factory).router)
            .await
            .map_err(|err| RuntimeExit::from_error(anyhow!(err).context("serverless runtime failed")))
    }
}

/// Request handler shared by the serverless transport and embedding hosts.
#[derive(Clone)]
pub struct ServerlessEntry {
    router: Router,
}

impl ServerlessEntry {
    pub fn new(factory: ServerFactory) -> Self {
        let router = mcp_routes(factory, &[MCP_PATH, API_MCP_PATH]).layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Build from configuration, locating the UI bundle under `cwd/dist` unless configured.
    pub fn from_config(config: &ServerConfig, cwd: PathBuf) -> Self {
        let context = ExecutionContext::Serverless { cwd };
        Self::new(ServerFactory::new(ServerSettings::from_config(config, &context)))
    }

    /// Same as [`ServerlessEntry::from_config`] using the process working directory.
    pub fn from_current_dir(config: &ServerConfig) -> io::Result<Self> {
        Ok(Self::from_config(config, env::current_dir()?))
    }

    /// Handle one platform-delivered request.
    pub async fn handle(&self, request: Request) -> Response {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

impl Service<Request> for ServerlessEntry {
    type Response = Response;
    type Error = Infallible;
    type Future = <Router as Service<Request>>::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Service::<Request>::poll_ready(&mut self.router, cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.router.call(request)
    }
}

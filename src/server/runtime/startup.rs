use std::process::ExitCode;

use anyhow::Error;

use super::{ServerFactory, ServerSettings};
use crate::{
    cli::{LaunchProfile, TransportMode, SERVERLESS_MARKER_ENV},
    lib::{
        paths::ExecutionContext,
        telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    },
    server::{
        config::ServerConfig,
        transport::{
            serve_with, HttpTransport, ServerlessTransport, StdioTransport, RUNTIME_API_ENV,
        },
    },
};

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// Serverless mode was selected outside a function host.
    pub fn missing_runtime_api() -> Self {
        Self {
            message: format!(
                "{SERVERLESS_MARKER_ENV} is set but {RUNTIME_API_ENV} is not: serverless mode \
                 only runs inside a function host, which supplies the runtime API address."
            ),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("Fatal error: {}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Start the MCP server on the transport chosen by the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let serverless = profile.mode == TransportMode::Serverless;
    let context = ExecutionContext::detect(serverless, &config.ui.entry_file)
        .map_err(RuntimeExit::from_error)?;
    let factory = ServerFactory::new(ServerSettings::from_config(&config, &context));

    let ui_bundle = factory.settings().ui.bundle_path().display().to_string();
    let config_path = config
        .source_path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    let is_http = profile.mode == TransportMode::Http;
    emit_runtime_mode(&RuntimeModeTelemetry {
        transport: profile.mode.as_str(),
        host: is_http.then_some(config.server.host.as_str()),
        port: is_http.then_some(config.server.port),
        config_path: config_path.as_deref(),
        ui_bundle: &ui_bundle,
        tool_variant: config.tool.variant.as_str(),
        launch_args: &profile.launch_args,
    });

    match profile.mode {
        TransportMode::Stdio => serve_with(StdioTransport, factory).await,
        TransportMode::Http => serve_with(HttpTransport::new(config.server), factory).await,
        TransportMode::Serverless => serve_with(ServerlessTransport::from_env(), factory).await,
    }
}

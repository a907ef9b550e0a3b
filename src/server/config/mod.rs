//! Load and validate server configuration.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod server;
pub mod telemetry;
pub mod tool;
pub mod ui;

pub use server::{parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PORT};
pub use tool::{parse_tool_section, RawToolSection, ToolSection, ToolVariant};
pub use ui::{parse_ui_section, RawUiSection, UiSection};

pub const CONFIG_ENV_KEY: &str = "MCP_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub ui: UiSection,
    pub tool: ToolSection,
    /// `None` when running on built-in defaults.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    ui: Option<RawUiSection>,
    tool: Option<RawToolSection>,
}

impl ServerConfig {
    /// Load from `path` if given, otherwise use built-in defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        telemetry::log_source(path.as_deref());
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let config = Self::default();
                telemetry::log_loaded(&config);
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "qrcode_mcp::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "qrcode_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "qrcode_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "qrcode_mcp::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Replace the configured port (from `PORT` or `--port`).
    pub fn with_port_override(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    fn from_raw(raw: RawServerConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, &path)?;
        let ui = parse_ui_section(raw.ui, &path)?;
        let tool = parse_tool_section(raw.tool, &path)?;

        Ok(Self {
            server,
            ui,
            tool,
            source_path: Some(path),
        })
    }
}

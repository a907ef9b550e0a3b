//! LaunchProfile and mode/config/port resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};

use crate::server::config::{CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

/// Set by the serverless hosting platform in every function invocation.
pub const SERVERLESS_MARKER_ENV: &str = "VERCEL";
const PORT_ENV: &str = "PORT";

/// MCP transport mode, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Http,
    Serverless,
}

impl TransportMode {
    /// Serverless wins unconditionally, then `--stdio`, then HTTP.
    pub const fn select(serverless_marker: bool, stdio_flag: bool) -> Self {
        if serverless_marker {
            TransportMode::Serverless
        } else if stdio_flag {
            TransportMode::Stdio
        } else {
            TransportMode::Http
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Http => "http",
            TransportMode::Serverless => "serverless",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: Option<PathBuf>,
    pub mode: TransportMode,
    pub port_override: Option<u16>,
    pub launch_args: Vec<String>,
}

/// Read the serverless marker. Only the process entry point calls this.
pub fn detect_serverless_marker() -> bool {
    env::var_os(SERVERLESS_MARKER_ENV).is_some_and(|value| !value.is_empty())
}

/// Resolve config path in the order: CLI override → env var → `config.toml` if present.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let explicit = override_path.or_else(|| {
        env::var_os(CONFIG_ENV_KEY)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    });

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = cwd.join(DEFAULT_CONFIG_PATH);
            if !default.is_file() {
                return Ok(None);
            }
            default
        }
    };

    if path.is_absolute() {
        return Ok(Some(path));
    }
    Ok(Some(cwd.join(path)))
}

/// Resolve the HTTP port in the order: CLI override → `PORT` env var.
///
/// Only the HTTP transport listens; other modes ignore both sources.
pub fn resolve_port(mode: TransportMode, port_override: Option<u16>) -> Result<Option<u16>> {
    resolve_port_from(mode, port_override, env::var(PORT_ENV).ok())
}

fn resolve_port_from(
    mode: TransportMode,
    port_override: Option<u16>,
    env_port: Option<String>,
) -> Result<Option<u16>> {
    if mode != TransportMode::Http {
        return Ok(None);
    }
    if let Some(port) = port_override {
        return validate_port(port).map(Some);
    }
    match env_port {
        Some(raw) if !raw.trim().is_empty() => parse_port(&raw).map(Some),
        _ => Ok(None),
    }
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    mode: TransportMode,
    config: Option<&Path>,
    port: Option<u16>,
) -> Vec<String> {
    let mut args = Vec::new();
    if mode == TransportMode::Stdio {
        args.push("--stdio".to_string());
    }
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if let Some(port) = port {
        args.push(format!("--port={port}"));
    }
    args
}

fn parse_port(raw: &str) -> Result<u16> {
    let port = raw
        .trim()
        .parse::<u16>()
        .map_err(|err| anyhow!("{PORT_ENV} must be a port number (1-65535): {err}"))?;
    validate_port(port)
}

fn validate_port(port: u16) -> Result<u16> {
    if port == 0 {
        return Err(anyhow!("port must be in the range 1-65535"));
    }
    Ok(port)
}

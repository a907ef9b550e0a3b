//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, resolve_port, LaunchProfile, TransportMode};
use crate::tools::qrcode::{GenerateQrCodeRequest, QrCodeType, WifiSecurity};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the formatted QR payload for some content without starting a server.
    #[command(about = "Print the formatted QR payload for some content")]
    Format(FormatArgs),
}

/// Arguments for `format`.
#[derive(Debug, Clone, Args)]
#[command(
    after_help = "Example: qrcode-mcp format --type wifi --content 'HomeNet|secret' --wifi-security WPA"
)]
pub struct FormatArgs {
    /// QR code type: text, url, email, phone, sms, wifi, or vcard. Unknown types encode as text.
    #[arg(long = "type", default_value = "text")]
    pub kind: String,
    /// Content to encode (`ssid|password` for wifi).
    #[arg(long, default_value = "")]
    pub content: String,
    /// WiFi security type.
    #[arg(long, value_parser = ["WPA", "WEP", "nopass"])]
    pub wifi_security: Option<String>,
    /// Mark the WiFi network as hidden.
    #[arg(long, default_value_t = false)]
    pub wifi_hidden: bool,
    #[arg(long)]
    pub vcard_name: Option<String>,
    #[arg(long)]
    pub vcard_org: Option<String>,
    #[arg(long)]
    pub vcard_title: Option<String>,
    #[arg(long)]
    pub vcard_email: Option<String>,
    #[arg(long)]
    pub vcard_phone: Option<String>,
    #[arg(long)]
    pub vcard_address: Option<String>,
    #[arg(long)]
    pub vcard_url: Option<String>,
}

impl FormatArgs {
    /// Build the tool request these arguments describe.
    pub fn to_request(&self) -> GenerateQrCodeRequest {
        let kind = match QrCodeType::lookup(&self.kind) {
            Some(kind) => kind,
            None => {
                tracing::warn!(
                    target: "qrcode_mcp::cli",
                    requested = %self.kind,
                    "Unknown QR code type; encoding as text"
                );
                QrCodeType::Text
            }
        };
        let wifi_security = self.wifi_security.as_deref().map(|value| match value {
            "WEP" => WifiSecurity::Wep,
            "nopass" => WifiSecurity::NoPass,
            _ => WifiSecurity::Wpa,
        });

        GenerateQrCodeRequest {
            wifi_security,
            wifi_hidden: Some(self.wifi_hidden),
            vcard_name: self.vcard_name.clone(),
            vcard_org: self.vcard_org.clone(),
            vcard_title: self.vcard_title.clone(),
            vcard_email: self.vcard_email.clone(),
            vcard_phone: self.vcard_phone.clone(),
            vcard_address: self.vcard_address.clone(),
            vcard_url: self.vcard_url.clone(),
            ..GenerateQrCodeRequest::new(kind, self.content.clone())
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "qrcode-mcp",
    author,
    version,
    about = "QR Code Generator MCP server (HTTP by default, --stdio for local clients)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Serve MCP over stdin/stdout instead of HTTP.
    #[arg(long, default_value_t = false)]
    pub stdio: bool,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// HTTP listen port (overrides PORT and config.toml).
    #[arg(long = "port")]
    pub port_override: Option<u16>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile`. `serverless_marker` is read by the entry point.
    pub fn build(self, serverless_marker: bool) -> Result<LaunchProfile> {
        let mode = TransportMode::select(serverless_marker, self.stdio);
        let config_path = resolve_config_path(self.config_override)?;
        let port_override = resolve_port(mode, self.port_override)?;
        let launch_args = build_launch_args(mode, config_path.as_deref(), port_override);

        Ok(LaunchProfile {
            config_path,
            mode,
            port_override,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self, serverless_marker: bool) -> Result<ParsedCommand> {
        match self.command.clone() {
            Some(command) => Ok(ParsedCommand::Cli(command)),
            None => Ok(ParsedCommand::RunServer(self.build(serverless_marker)?)),
        }
    }
}

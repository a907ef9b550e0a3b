//! CLI entrypoint module structure.
use anyhow::{anyhow, Result};

use crate::tools::qrcode::format_payload;

pub mod args;
pub mod profile;

pub use args::{CliCommand, FormatArgs, LaunchProfileArgs, ParsedCommand};
pub use profile::{
    build_launch_args, detect_serverless_marker, resolve_config_path, resolve_port, LaunchProfile,
    TransportMode, SERVERLESS_MARKER_ENV,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Format(args) => format_to_json(&args),
    }
}

/// Format the requested content and render the payload as pretty JSON.
fn format_to_json(args: &FormatArgs) -> Result<String> {
    let request = args.to_request();
    request.validate().map_err(|err| anyhow!(err))?;
    let payload = format_payload(&request);
    Ok(serde_json::to_string_pretty(&payload)?)
}

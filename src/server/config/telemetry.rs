use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_source(path: Option<&std::path::Path>) {
    match path {
        Some(path) => info!(
            target: "qrcode_mcp::config",
            path = %path.display(),
            "Loading configuration file"
        ),
        None => debug!(
            target: "qrcode_mcp::config",
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "No configuration file found; using built-in defaults"
        ),
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "qrcode_mcp::config",
        path = ?config.source_path,
        host = %config.server.host,
        port = config.server.port,
        dist_dir = ?config.ui.dist_dir,
        entry_file = %config.ui.entry_file,
        tool_variant = config.tool.variant.as_str(),
        "Configuration loaded"
    );
}

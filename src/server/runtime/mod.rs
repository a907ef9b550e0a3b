//! MCP server construction, startup, and tool registration.
mod factory;
mod server_info;
mod startup;
mod tool_registry;

pub use factory::{InstanceLifecycle, ServerFactory, ServerSettings, TeardownHook};
pub use server_info::{build_instructions, SERVER_NAME, SERVICE_TITLE};
pub use startup::{run_server, RuntimeExit};
pub use tool_registry::QrCodeServer;

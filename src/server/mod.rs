//! MCP server: configuration, instance runtime, and transports.
pub mod config;
pub mod runtime;
pub mod transport;

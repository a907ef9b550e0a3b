//! Single-request MCP sessions used by the stateless HTTP endpoints.
//!
//! A fresh `QrCodeServer` is served over an in-memory pipe, answers exactly one
//! JSON-RPC request and is cancelled before the HTTP response is built.
use std::{io, time::Duration};

use rmcp::{
    service::{serve_directly, RunningService},
    RoleServer,
};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{duplex, split, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tracing::{debug, warn};

use crate::server::runtime::{QrCodeServer, ServerFactory};

const PIPE_CAPACITY: usize = 64 * 1024;
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Shape of an inbound JSON-RPC message.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Request { id: Value },
    Notification,
    Response,
}

impl Inbound {
    /// `None` when `message` is not a single JSON-RPC 2.0 object.
    pub fn classify(message: &Value) -> Option<Self> {
        let object = message.as_object()?;
        if object.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return None;
        }
        let id = object.get("id").filter(|id| !id.is_null());
        match (object.get("method").and_then(Value::as_str), id) {
            (Some(_), Some(id)) => Some(Self::Request { id: id.clone() }),
            (Some(_), None) => Some(Self::Notification),
            (None, Some(_)) if object.contains_key("result") || object.contains_key("error") => {
                Some(Self::Response)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum OneshotError {
    #[error("failed to encode or decode a JSON-RPC message: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("pipe to the MCP instance failed: {0}")]
    Io(#[from] io::Error),
    #[error("MCP instance closed without answering request {0}")]
    NoResponse(Value),
    #[error("MCP instance did not answer request {0} in time")]
    Timeout(Value),
}

/// Serve `message` on a new instance and return the response carrying `id`.
///
/// The instance is cancelled and awaited before this returns. When the future is
/// dropped early the client half of the pipe closes, which ends the instance's
/// service loop and releases it.
pub async fn answer_request(
    factory: &ServerFactory,
    message: &Value,
    id: &Value,
) -> Result<Value, OneshotError> {
    let (server_io, client_io) = duplex(PIPE_CAPACITY);
    let running: RunningService<RoleServer, QrCodeServer> =
        serve_directly(factory.create(), server_io, None);

    let outcome = match tokio::time::timeout(REPLY_TIMEOUT, exchange(client_io, message, id)).await
    {
        Ok(outcome) => outcome,
        Err(_) => Err(OneshotError::Timeout(id.clone())),
    };
    if let Err(err) = running.cancel().await {
        warn!(target: "qrcode_mcp::transport", "MCP instance task failed during shutdown: {err}");
    }
    outcome
}

async fn exchange(pipe: DuplexStream, message: &Value, id: &Value) -> Result<Value, OneshotError> {
    let (reader, mut writer) = split(pipe);
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;

    let mut lines = BufReader::new(reader).lines();
    while let Some(raw) = lines.next_line().await? {
        let reply: Value = serde_json::from_str(&raw)?;
        if is_reply_to(&reply, id) {
            return Ok(reply);
        }
        debug!(target: "qrcode_mcp::transport", "Dropped out-of-band message from instance");
    }
    Err(OneshotError::NoResponse(id.clone()))
}

fn is_reply_to(reply: &Value, id: &Value) -> bool {
    reply.get("id") == Some(id) && (reply.get("result").is_some() || reply.get("error").is_some())
}

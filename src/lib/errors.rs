use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use rmcp::model::{ErrorCode, ErrorData};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures while serving the embedded UI resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("UI bundle for {uri} could not be read from {path}: {source}")]
    NotFound {
        uri: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unknown resource URI: {uri}")]
    UnknownUri { uri: String },
}

/// Structured error metadata returned by MCP tools and resources.
#[derive(Debug, Clone)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    /// JSON-RPC error code used on the wire.
    pub rpc_code: ErrorCode,
}

impl ToolErrorDescriptor {
    /// Simple constructor.
    pub const fn new(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
        rpc_code: ErrorCode,
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            rpc_code,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    retryable: Option<bool>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            retryable: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        Ok(ErrorData::new(
            self.descriptor.rpc_code,
            self.descriptor.message,
            Some(Value::Object(data)),
        ))
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

/// The UI bundle file is absent at the resolved dist directory.
pub const UI_BUNDLE_MISSING_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "UI_BUNDLE_MISSING",
    "QR code UI bundle could not be read",
    "Build the UI so mcp-app.html exists in the dist directory, or point [ui].dist_dir at the built bundle.",
    ErrorCode::RESOURCE_NOT_FOUND,
);

/// A resource URI other than the QR code UI was requested.
pub const UNKNOWN_RESOURCE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "UNKNOWN_RESOURCE",
    "Requested resource URI is not served by this server",
    "Request the URI advertised by resources/list.",
    ErrorCode::RESOURCE_NOT_FOUND,
);

/// Tool input passed schema validation but carries no encodable content.
pub const EMPTY_CONTENT_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "EMPTY_CONTENT",
    "QR code content must not be empty",
    "Provide a non-empty value for the named field.",
    ErrorCode::INVALID_PARAMS,
);

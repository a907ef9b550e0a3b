//! MCP resources served alongside the tool.

pub mod app_ui;

use rmcp::model::ErrorData;
use serde_json::json;

use crate::lib::errors::{ResourceError, UI_BUNDLE_MISSING_ERROR, UNKNOWN_RESOURCE_ERROR};

pub use app_ui::{AppUiResource, APP_UI_MIME_TYPE, APP_UI_NAME, APP_UI_URI, DEFAULT_ENTRY_FILE};

/// Convert resource failures into `resource_not_found` error data.
pub fn resource_error_to_error_data(err: ResourceError) -> ErrorData {
    let reason = err.to_string();
    let built = match &err {
        ResourceError::NotFound { uri, path, .. } => UI_BUNDLE_MISSING_ERROR
            .builder()
            .retryable(false)
            .details(json!({ "reason": reason }))
            .with_context_field("uri", json!(uri))
            .with_context_field("path", json!(path.display().to_string()))
            .build(),
        ResourceError::UnknownUri { uri } => UNKNOWN_RESOURCE_ERROR
            .builder()
            .retryable(false)
            .details(json!({ "available": [APP_UI_URI] }))
            .with_context_field("uri", json!(uri))
            .build(),
    };
    built.unwrap_or_else(|_| ErrorData::resource_not_found(reason, None))
}

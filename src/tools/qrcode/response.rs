use rmcp::model::{CallToolResult, Content, ErrorData};
use serde::Serialize;
use serde_json::json;

use super::{
    format::{wifi_network_name, QrPayload},
    request::{GenerateQrCodeRequest, QrCodeType, RequestValidationError},
};
use crate::lib::errors::EMPTY_CONTENT_ERROR;

/// Structured content returned by the typed tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrCodeOutput<'a> {
    pub qr_data: &'a QrPayload,
    pub resource_uri: &'a str,
}

/// Structured content returned by the text-only tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeTextOutput<'a> {
    pub text: &'a str,
    pub resource_uri: &'a str,
}

/// Human-readable summary; WiFi requests echo the network name only.
pub fn summary_text(request: &GenerateQrCodeRequest) -> String {
    match request.kind {
        QrCodeType::Wifi => format!(
            "Generated wifi QR code for network: {}",
            wifi_network_name(&request.content)
        ),
        kind => format!("Generated {} QR code", kind.as_str()),
    }
}

/// Package a formatted payload as a tool result.
pub fn typed_tool_result(
    request: &GenerateQrCodeRequest,
    payload: &QrPayload,
    resource_uri: &str,
) -> Result<CallToolResult, ErrorData> {
    let output = GenerateQrCodeOutput {
        qr_data: payload,
        resource_uri,
    };
    structured_result(summary_text(request), &output)
}

/// Package the echoed text as a tool result.
pub fn text_tool_result(text: &str, resource_uri: &str) -> Result<CallToolResult, ErrorData> {
    let output = EncodeTextOutput { text, resource_uri };
    structured_result(format!("QR code generated for: {text}"), &output)
}

fn structured_result(
    summary: String,
    output: &impl Serialize,
) -> Result<CallToolResult, ErrorData> {
    let structured = serde_json::to_value(output).map_err(|err| {
        ErrorData::internal_error(
            "failed to serialize QR code payload",
            Some(json!({ "reason": err.to_string() })),
        )
    })?;
    let mut result = CallToolResult::success(vec![Content::text(summary)]);
    result.structured_content = Some(structured);
    Ok(result)
}

/// Convert input validation failures to `ErrorData` naming the offending field.
pub fn validation_error_to_error_data(err: RequestValidationError) -> ErrorData {
    EMPTY_CONTENT_ERROR
        .builder()
        .retryable(false)
        .details(json!({ "reason": err.to_string() }))
        .with_context_field("field", json!(err.field()))
        .build()
        .unwrap_or_else(|_| ErrorData::invalid_params(err.to_string(), None))
}

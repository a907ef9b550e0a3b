//! `generate_qrcode` tool: input types, per-type formatting, and result packaging.
pub mod format;
pub mod request;
pub mod response;

pub use format::{format_payload, wifi_network_name, FormatRule, QrPayload, WifiCredentials};
pub use request::{
    EncodeTextRequest, GenerateQrCodeRequest, QrCodeType, RequestValidationError, WifiSecurity,
};
pub use response::{
    summary_text, text_tool_result, typed_tool_result, validation_error_to_error_data,
};

pub const QRCODE_TOOL_ID: &str = "generate_qrcode";

use crate::{resources::AppUiResource, server::config::ToolVariant, tools::qrcode::QRCODE_TOOL_ID};

/// Server name reported in `initialize` and the HTTP service descriptor.
pub const SERVER_NAME: &str = "qrcode-generator";
/// Human-facing service title.
pub const SERVICE_TITLE: &str = "QR Code Generator MCP Server";

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(variant: ToolVariant, ui: &AppUiResource) -> String {
    let input = match variant {
        ToolVariant::Typed => {
            "Pass `type` (text, url, email, phone, sms, wifi, vcard) and `content`; wifi content is `ssid|password`, vcard details go in the vcard* fields."
        }
        ToolVariant::Text => "Pass the string to encode as `text`.",
    };
    format!(
        "Call {QRCODE_TOOL_ID} to create a QR code. {input} The result renders in the interactive UI resource {uri}.",
        uri = ui.uri()
    )
}

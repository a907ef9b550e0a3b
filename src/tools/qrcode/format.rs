//! Content-to-payload formatting for each QR code type.
//!
//! Every type maps to a [`FormatRule`]: a display title plus an encoder that turns the
//! validated request into the string the UI encodes. Encoders are pure.

use serde::{Deserialize, Serialize};

use super::request::{GenerateQrCodeRequest, QrCodeType};

type Encoder = fn(&GenerateQrCodeRequest) -> String;

/// Formatting rule for one QR code type.
#[derive(Clone, Copy)]
pub struct FormatRule {
    pub title: &'static str,
    encode: Encoder,
}

impl FormatRule {
    pub fn encode(&self, request: &GenerateQrCodeRequest) -> String {
        (self.encode)(request)
    }
}

impl QrCodeType {
    /// Formatting rule dispatched on the type tag.
    pub fn rule(&self) -> FormatRule {
        match self {
            QrCodeType::Text => FormatRule {
                title: "Text QR Code",
                encode: encode_text,
            },
            QrCodeType::Url => FormatRule {
                title: "URL QR Code",
                encode: encode_url,
            },
            QrCodeType::Email => FormatRule {
                title: "Email QR Code",
                encode: encode_email,
            },
            QrCodeType::Phone => FormatRule {
                title: "Phone QR Code",
                encode: encode_phone,
            },
            QrCodeType::Sms => FormatRule {
                title: "SMS QR Code",
                encode: encode_sms,
            },
            QrCodeType::Wifi => FormatRule {
                title: "WiFi QR Code",
                encode: encode_wifi,
            },
            QrCodeType::Vcard => FormatRule {
                title: "vCard QR Code",
                encode: encode_vcard,
            },
        }
    }
}

/// Formatted result consumed by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    #[serde(rename = "type")]
    pub kind: QrCodeType,
    /// String the UI encodes into the QR matrix.
    pub content: String,
    pub original_input: String,
    pub display_title: String,
}

/// Format a request into its payload.
pub fn format_payload(request: &GenerateQrCodeRequest) -> QrPayload {
    let rule = request.kind.rule();
    QrPayload {
        kind: request.kind,
        content: rule.encode(request),
        original_input: request.content.clone(),
        display_title: rule.title.to_string(),
    }
}

fn encode_text(request: &GenerateQrCodeRequest) -> String {
    request.content.clone()
}

fn encode_url(request: &GenerateQrCodeRequest) -> String {
    let url = request.content.as_str();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn encode_email(request: &GenerateQrCodeRequest) -> String {
    format!("mailto:{}", request.content)
}

fn encode_phone(request: &GenerateQrCodeRequest) -> String {
    format!("tel:{}", request.content)
}

fn encode_sms(request: &GenerateQrCodeRequest) -> String {
    format!("sms:{}", request.content)
}

fn encode_wifi(request: &GenerateQrCodeRequest) -> String {
    let credentials = WifiCredentials::parse(&request.content);
    let security = request.wifi_security.unwrap_or_default();
    let hidden = request.wifi_hidden.unwrap_or(false);
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        security.as_str(),
        credentials.ssid,
        credentials.password,
        hidden
    )
}

fn encode_vcard(request: &GenerateQrCodeRequest) -> String {
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    if let Some(name) = present(&request.vcard_name) {
        lines.push(format!("FN:{name}"));
        lines.push(structured_name(name));
    }
    if let Some(org) = present(&request.vcard_org) {
        lines.push(format!("ORG:{org}"));
    }
    if let Some(title) = present(&request.vcard_title) {
        lines.push(format!("TITLE:{title}"));
    }
    if let Some(email) = present(&request.vcard_email) {
        lines.push(format!("EMAIL:{email}"));
    }
    if let Some(phone) = present(&request.vcard_phone) {
        lines.push(format!("TEL:{phone}"));
    }
    if let Some(address) = present(&request.vcard_address) {
        lines.push(format!("ADR:;;{address};;;;"));
    }
    if let Some(url) = present(&request.vcard_url) {
        lines.push(format!("URL:{url}"));
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// `N:` line: the last space-separated token is the surname.
fn structured_name(full_name: &str) -> String {
    let tokens: Vec<&str> = full_name.split(' ').collect();
    match tokens.split_last() {
        Some((surname, given)) => format!("N:{surname};{};;;", given.join(" ")),
        None => format!("N:{full_name};;;;"),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// `ssid|password` split of WiFi content.
#[derive(Debug, PartialEq, Eq)]
pub struct WifiCredentials<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

impl<'a> WifiCredentials<'a> {
    pub fn parse(content: &'a str) -> Self {
        let mut segments = content.split('|');
        let ssid = match segments.next() {
            Some(first) if !first.is_empty() => first,
            _ => content,
        };
        let password = segments.next().unwrap_or("");
        Self { ssid, password }
    }
}

/// Network name as echoed in the tool summary: the raw first segment.
pub fn wifi_network_name(content: &str) -> &str {
    content.split('|').next().unwrap_or_default()
}

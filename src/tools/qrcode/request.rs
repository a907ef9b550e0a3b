use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of content encoded into the QR code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QrCodeType {
    Text,
    Url,
    Email,
    Phone,
    Sms,
    Wifi,
    Vcard,
}

impl QrCodeType {
    pub const ALL: [QrCodeType; 7] = [
        QrCodeType::Text,
        QrCodeType::Url,
        QrCodeType::Email,
        QrCodeType::Phone,
        QrCodeType::Sms,
        QrCodeType::Wifi,
        QrCodeType::Vcard,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            QrCodeType::Text => "text",
            QrCodeType::Url => "url",
            QrCodeType::Email => "email",
            QrCodeType::Phone => "phone",
            QrCodeType::Sms => "sms",
            QrCodeType::Wifi => "wifi",
            QrCodeType::Vcard => "vcard",
        }
    }

    /// Case-insensitive lookup by tag.
    pub fn lookup(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
    }
}

/// WiFi authentication scheme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum WifiSecurity {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiSecurity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}

/// Input for the typed `generate_qrcode` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrCodeRequest {
    /// Type of QR code to generate: text, url, email, phone, sms, wifi, or vcard
    #[serde(rename = "type")]
    pub kind: QrCodeType,
    /// Content for the QR code. For wifi use `ssid|password`.
    pub content: String,
    /// WiFi security type (only for wifi type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_security: Option<WifiSecurity>,
    /// Whether WiFi network is hidden (only for wifi type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_hidden: Option<bool>,
    /// Full name for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_name: Option<String>,
    /// Organization for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_org: Option<String>,
    /// Job title for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_title: Option<String>,
    /// Email for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_email: Option<String>,
    /// Phone number for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_phone: Option<String>,
    /// Address for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_address: Option<String>,
    /// Website URL for vCard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_url: Option<String>,
}

impl GenerateQrCodeRequest {
    /// Request with only the required fields set.
    pub fn new(kind: QrCodeType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            wifi_security: None,
            wifi_hidden: None,
            vcard_name: None,
            vcard_org: None,
            vcard_title: None,
            vcard_email: None,
            vcard_phone: None,
            vcard_address: None,
            vcard_url: None,
        }
    }

    /// Reject requests with nothing to encode. vCards draw on their own fields.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.kind != QrCodeType::Vcard && self.content.is_empty() {
            return Err(RequestValidationError::EmptyField {
                field: "content",
                kind: self.kind,
            });
        }
        Ok(())
    }
}

/// Input for the text-only `generate_qrcode` variant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EncodeTextRequest {
    /// The text, URL, phone number, or data to encode as a QR code
    pub text: String,
}

impl EncodeTextRequest {
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.text.is_empty() {
            return Err(RequestValidationError::EmptyField {
                field: "text",
                kind: QrCodeType::Text,
            });
        }
        Ok(())
    }
}

/// Input validation failures not caught by the JSON schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("`{field}` must not be empty for {} QR codes", .kind.as_str())]
    EmptyField {
        field: &'static str,
        kind: QrCodeType,
    },
}

impl RequestValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            RequestValidationError::EmptyField { field, .. } => field,
        }
    }
}

use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

/// Shape of the `generate_qrcode` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolVariant {
    /// Multi-type input formatted server-side.
    #[default]
    Typed,
    /// Single `text` field echoed back; the UI encodes it as-is.
    Text,
}

impl ToolVariant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ToolVariant::Typed => "typed",
            ToolVariant::Text => "text",
        }
    }
}

/// Tool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSection {
    pub variant: ToolVariant,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawToolSection {
    pub variant: Option<String>,
}

pub fn parse_tool_section(
    raw: Option<RawToolSection>,
    path: &Path,
) -> Result<ToolSection, ConfigError> {
    let variant = match raw.unwrap_or_default().variant.as_deref().map(str::trim) {
        None | Some("typed") => ToolVariant::Typed,
        Some("text") => ToolVariant::Text,
        Some(other) => {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "tool.variant",
                message: format!("Unknown variant `{other}`; use \"typed\" or \"text\""),
            })
        }
    };
    Ok(ToolSection { variant })
}

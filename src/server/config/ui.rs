use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{lib::errors::ConfigError, lib::paths::is_nonempty_absolute, resources::DEFAULT_ENTRY_FILE};

/// UI bundle location settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSection {
    /// Explicit bundle directory; when unset it is resolved from the execution context.
    pub dist_dir: Option<PathBuf>,
    pub entry_file: String,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            dist_dir: None,
            entry_file: DEFAULT_ENTRY_FILE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawUiSection {
    pub dist_dir: Option<PathBuf>,
    pub entry_file: Option<String>,
}

/// Relative `dist_dir` values are taken relative to the config file.
pub fn parse_ui_section(raw: Option<RawUiSection>, path: &Path) -> Result<UiSection, ConfigError> {
    let ui_raw = raw.unwrap_or_default();

    let dist_dir = ui_raw
        .dist_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| {
            if is_nonempty_absolute(&dir) {
                dir
            } else {
                path.parent().unwrap_or_else(|| Path::new("")).join(dir)
            }
        });

    let entry_file = ui_raw
        .entry_file
        .unwrap_or_else(|| DEFAULT_ENTRY_FILE.to_string());
    if entry_file.trim().is_empty() || entry_file.contains(['/', '\\']) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "ui.entry_file",
            message: "Use a plain file name inside the dist directory".into(),
        });
    }

    Ok(UiSection {
        dist_dir,
        entry_file,
    })
}

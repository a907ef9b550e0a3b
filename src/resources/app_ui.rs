use std::path::{Path, PathBuf};

use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};
use tracing::debug;

use crate::lib::errors::ResourceError;

/// Fixed URI of the interactive QR code UI.
pub const APP_UI_URI: &str = "ui://qrcode-generator/mcp-app.html";
/// MIME type hosts use to recognise embeddable MCP app documents.
pub const APP_UI_MIME_TYPE: &str = "text/html;profile=mcp-app";
pub const APP_UI_NAME: &str = "QR Code Generator";
const APP_UI_DESCRIPTION: &str = "QR code generator interface";
/// Entry document of the built UI bundle.
pub const DEFAULT_ENTRY_FILE: &str = "mcp-app.html";

/// The UI bundle document, read from disk on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUiResource {
    bundle_path: PathBuf,
}

impl AppUiResource {
    pub fn new(dist_dir: impl AsRef<Path>, entry_file: &str) -> Self {
        Self {
            bundle_path: dist_dir.as_ref().join(entry_file),
        }
    }

    pub fn uri(&self) -> &'static str {
        APP_UI_URI
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Descriptor advertised by `resources/list`.
    pub fn descriptor(&self) -> Resource {
        let mut raw = RawResource::new(APP_UI_URI, APP_UI_NAME);
        raw.description = Some(APP_UI_DESCRIPTION.to_string());
        raw.mime_type = Some(APP_UI_MIME_TYPE.to_string());
        raw.no_annotation()
    }

    /// Read the bundle HTML.
    pub async fn load(&self) -> Result<String, ResourceError> {
        debug!(
            target: "qrcode_mcp::resources",
            path = %self.bundle_path.display(),
            "Reading UI bundle"
        );
        tokio::fs::read_to_string(&self.bundle_path)
            .await
            .map_err(|source| ResourceError::NotFound {
                uri: APP_UI_URI.to_string(),
                path: self.bundle_path.clone(),
                source,
            })
    }

    /// Serve `resources/read` for `uri`.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        if uri != APP_UI_URI {
            return Err(ResourceError::UnknownUri {
                uri: uri.to_string(),
            });
        }
        let html = self.load().await?;
        let mut contents = ResourceContents::text(html, APP_UI_URI);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(APP_UI_MIME_TYPE.to_string());
        }
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::{build_instructions, QrCodeServer};
use crate::{
    lib::paths::{resolve_dist_dir, ExecutionContext},
    resources::AppUiResource,
    server::config::{ServerConfig, ToolVariant},
};

/// Callback run once when a server instance is released.
pub type TeardownHook = Arc<dyn Fn(Uuid) + Send + Sync>;

/// Immutable settings shared by every instance a factory produces.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub variant: ToolVariant,
    pub ui: AppUiResource,
    pub instructions: String,
}

impl ServerSettings {
    pub fn new(variant: ToolVariant, ui: AppUiResource) -> Self {
        let instructions = build_instructions(variant, &ui);
        Self {
            variant,
            ui,
            instructions,
        }
    }

    /// Settings for `config`, locating the UI bundle for `context` unless configured.
    pub fn from_config(config: &ServerConfig, context: &ExecutionContext) -> Self {
        let dist_dir = config
            .ui
            .dist_dir
            .clone()
            .unwrap_or_else(|| resolve_dist_dir(context));
        Self::new(
            config.tool.variant,
            AppUiResource::new(dist_dir, &config.ui.entry_file),
        )
    }
}

/// Produces independent `QrCodeServer` instances.
#[derive(Clone)]
pub struct ServerFactory {
    settings: Arc<ServerSettings>,
    on_release: Option<TeardownHook>,
}

impl ServerFactory {
    pub fn new(settings: ServerSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            on_release: None,
        }
    }

    /// Run `hook` whenever an instance from this factory is released.
    pub fn with_teardown_hook(mut self, hook: impl Fn(Uuid) + Send + Sync + 'static) -> Self {
        self.on_release = Some(Arc::new(hook));
        self
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Create a fresh instance with its own lifecycle.
    pub fn create(&self) -> QrCodeServer {
        let lifecycle = InstanceLifecycle::start(self.on_release.clone());
        QrCodeServer::new(Arc::clone(&self.settings), lifecycle)
    }
}

/// Release marker shared by all clones of one server instance.
///
/// Dropped exactly once, when the transport lets go of the last clone.
pub struct InstanceLifecycle {
    instance_id: Uuid,
    on_release: Option<TeardownHook>,
}

impl InstanceLifecycle {
    fn start(on_release: Option<TeardownHook>) -> Arc<Self> {
        let instance_id = Uuid::new_v4();
        debug!(
            target: "qrcode_mcp::runtime",
            %instance_id,
            "Created MCP server instance"
        );
        Arc::new(Self {
            instance_id,
            on_release,
        })
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

impl Drop for InstanceLifecycle {
    fn drop(&mut self) {
        debug!(
            target: "qrcode_mcp::runtime",
            instance_id = %self.instance_id,
            "Released MCP server instance"
        );
        if let Some(hook) = self.on_release.take() {
            hook(self.instance_id);
        }
    }
}

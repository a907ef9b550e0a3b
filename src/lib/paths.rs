//! Shared path helpers, including resolution of the UI bundle directory.

use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Directory name of the built UI bundle.
pub const DIST_DIR_NAME: &str = "dist";

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Where the server artifact runs relative to the UI build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Hosted by a serverless platform; the bundle ships under `<cwd>/dist`.
    Serverless { cwd: PathBuf },
    /// The binary was placed inside the bundle directory next to the entry file.
    Packaged { exe_dir: PathBuf },
    /// Running from a source checkout; the bundle is built into `<manifest>/dist`.
    Source { manifest_dir: PathBuf },
}

impl ExecutionContext {
    /// Detect the context for this process.
    ///
    /// `serverless` is injected by the entry point; it is never read from the environment here.
    pub fn detect(serverless: bool, entry_file: &str) -> io::Result<Self> {
        if serverless {
            return Ok(Self::Serverless {
                cwd: env::current_dir()?,
            });
        }

        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if let Some(exe_dir) = exe_dir {
            if exe_dir.join(entry_file).is_file() {
                return Ok(Self::Packaged { exe_dir });
            }
        }

        Ok(Self::Source {
            manifest_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        })
    }
}

/// Resolve the absolute directory holding the UI bundle for an execution context.
pub fn resolve_dist_dir(context: &ExecutionContext) -> PathBuf {
    match context {
        ExecutionContext::Serverless { cwd } => cwd.join(DIST_DIR_NAME),
        ExecutionContext::Packaged { exe_dir } => exe_dir.clone(),
        ExecutionContext::Source { manifest_dir } => manifest_dir.join(DIST_DIR_NAME),
    }
}

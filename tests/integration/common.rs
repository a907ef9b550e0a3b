use std::{
    io,
    path::PathBuf,
    process::Stdio,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{Context, Result};
use qrcode_mcp::{
    resources::{AppUiResource, DEFAULT_ENTRY_FILE},
    server::{
        config::ToolVariant,
        runtime::{QrCodeServer, ServerFactory, ServerSettings},
    },
};
use rmcp::{model::ClientInfo, serve_client, service::RunningService, RoleClient, ServiceExt};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_qrcode-mcp");

pub type Client = RunningService<RoleClient, ClientInfo>;

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

pub fn fixture_dist() -> PathBuf {
    PathBuf::from(fixture("tests/fixtures/dist"))
}

/// Factory whose instances bump the returned counter when released.
pub fn counting_factory(variant: ToolVariant) -> (ServerFactory, Arc<AtomicUsize>) {
    counting_factory_for(variant, AppUiResource::new(fixture_dist(), DEFAULT_ENTRY_FILE))
}

pub fn counting_factory_for(
    variant: ToolVariant,
    ui: AppUiResource,
) -> (ServerFactory, Arc<AtomicUsize>) {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let factory = ServerFactory::new(ServerSettings::new(variant, ui)).with_teardown_hook(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (factory, released)
}

/// Serve `server` over an in-memory pipe and connect a client to it.
pub async fn connect(server: QrCodeServer) -> Result<(Client, JoinHandle<Result<()>>)> {
    let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

/// Poll until `counter` reaches `expected`, failing after a few seconds.
pub async fn wait_for_releases(counter: &AtomicUsize, expected: usize) -> Result<()> {
    tokio::time::timeout(Duration::from_secs(5), async {
        while counter.load(Ordering::SeqCst) < expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .with_context(|| {
        format!(
            "expected {expected} released instances, saw {}",
            counter.load(Ordering::SeqCst)
        )
    })
}

pub async fn spawn_stdio_server() -> Result<(Child, ChildIoBridge, Option<JoinHandle<()>>)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .arg("--stdio")
        .env("MCP_CONFIG_PATH", fixture("tests/fixtures/config_valid.toml"))
        .env_remove("VERCEL")
        // stdio never listens, so a malformed PORT must not stop it
        .env("PORT", "not-a-port")
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().expect("child stdout");
    let stdin = child.stdin.take().expect("child stdin");
    let bridge = ChildIoBridge::new(stdout, stdin);
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
        })
    });
    Ok((child, bridge, stderr_handle))
}

pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}

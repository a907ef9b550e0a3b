use std::{process::Command as StdCommand, time::Duration};

use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo, ReadResourceRequestParam},
    serve_client,
};
use serde_json::json;
use tokio::time::timeout;

use crate::common::{spawn_stdio_server, BINARY_PATH};

#[tokio::test]
async fn stdio_session_lists_and_calls_the_tool() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_stdio_server().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    assert!(
        list.tools
            .iter()
            .any(|tool| tool.name.as_ref() == "generate_qrcode"),
        "list_tools should include generate_qrcode: {:?}",
        list.tools
    );
    assert_eq!(list.tools[0].title.as_deref(), Some("Generate QR Code"));

    let result = client
        .call_tool(CallToolRequestParam {
            name: "generate_qrcode".into(),
            arguments: json!({ "type": "phone", "content": "+15551234" })
                .as_object()
                .cloned(),
        })
        .await?;
    let structured = result.structured_content.expect("structured_content");
    assert_eq!(structured["qrData"]["content"], "tel:+15551234");

    let resource = client
        .read_resource(ReadResourceRequestParam {
            uri: "ui://qrcode-generator/mcp-app.html".into(),
        })
        .await?;
    assert_eq!(resource.contents.len(), 1);

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[test]
fn serverless_marker_outside_function_host_fails() {
    let output = StdCommand::new(BINARY_PATH)
        .env("VERCEL", "1")
        .env("PORT", "not-a-port")
        .env_remove("AWS_LAMBDA_RUNTIME_API")
        .env_remove("MCP_CONFIG_PATH")
        .output()
        .expect("process should start");

    assert!(!output.status.success(), "status: {:?}", output.status);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AWS_LAMBDA_RUNTIME_API"), "stderr: {stderr}");
    assert!(!stderr.contains("PORT must be"), "stderr: {stderr}");
}

#[test]
fn format_subcommand_prints_payload() {
    let output = StdCommand::new(BINARY_PATH)
        .args(["format", "--type", "sms", "--content", "+1555"])
        .env_remove("VERCEL")
        .output()
        .expect("process should start");

    assert!(output.status.success(), "status: {:?}", output.status);
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(payload["content"], "sms:+1555");
    assert_eq!(payload["displayTitle"], "SMS QR Code");
}

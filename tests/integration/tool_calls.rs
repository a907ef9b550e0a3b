use std::sync::atomic::Ordering;

use anyhow::Result;
use qrcode_mcp::{
    resources::APP_UI_URI,
    server::{config::ToolVariant, runtime::SERVER_NAME},
};
use rmcp::{
    model::{CallToolRequestParam, CallToolResult, ErrorCode, JsonObject},
    ServiceError,
};
use serde_json::{json, Value};

use crate::common::{connect, counting_factory, wait_for_releases, Client};

fn arguments(value: Value) -> JsonObject {
    value.as_object().expect("object").clone()
}

async fn call(client: &Client, args: Value) -> Result<CallToolResult, ServiceError> {
    client
        .call_tool(CallToolRequestParam {
            name: "generate_qrcode".into(),
            arguments: Some(arguments(args)),
        })
        .await
}

fn first_text(result: &CallToolResult) -> String {
    let value = serde_json::to_value(&result.content[0]).expect("content serializes");
    value["text"].as_str().expect("text content").to_string()
}

#[tokio::test]
async fn initialize_reports_server_identity_and_tool() -> Result<()> {
    let (factory, _) = counting_factory(ToolVariant::Typed);
    let (client, server_task) = connect(factory.create()).await?;

    let info = client.peer_info().expect("server info after initialize");
    assert_eq!(info.server_info.name, SERVER_NAME);
    assert!(info
        .instructions
        .as_deref()
        .is_some_and(|text| text.contains(APP_UI_URI)));

    let tools = client.list_tools(None).await?;
    assert_eq!(tools.tools.len(), 1);
    let tool = &tools.tools[0];
    assert_eq!(tool.name.as_ref(), "generate_qrcode");
    assert_eq!(tool.title.as_deref(), Some("Generate QR Code"));
    let properties = tool.input_schema.get("properties").expect("schema properties");
    assert!(properties.get("type").is_some(), "schema: {properties}");
    assert!(properties.get("content").is_some(), "schema: {properties}");

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn wifi_call_formats_payload_and_hides_password() -> Result<()> {
    let (factory, _) = counting_factory(ToolVariant::Typed);
    let (client, server_task) = connect(factory.create()).await?;

    let result = call(&client, json!({ "type": "wifi", "content": "Home|pw" })).await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let summary = first_text(&result);
    assert_eq!(summary, "Generated wifi QR code for network: Home");
    assert!(!summary.contains("pw"));

    let structured = result.structured_content.expect("structured_content");
    assert_eq!(structured["qrData"]["type"], "wifi");
    assert_eq!(
        structured["qrData"]["content"],
        "WIFI:T:WPA;S:Home;P:pw;H:false;;"
    );
    assert_eq!(structured["qrData"]["originalInput"], "Home|pw");
    assert_eq!(structured["qrData"]["displayTitle"], "WiFi QR Code");
    assert_eq!(structured["resourceUri"], APP_UI_URI);
    Ok(())
}

#[tokio::test]
async fn url_and_vcard_calls_follow_type_rules() -> Result<()> {
    let (factory, _) = counting_factory(ToolVariant::Typed);
    let (client, server_task) = connect(factory.create()).await?;

    let url = call(&client, json!({ "type": "url", "content": "example.com" })).await?;
    let vcard = call(
        &client,
        json!({ "type": "vcard", "content": "", "vcardName": "Jane Doe" }),
    )
    .await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_eq!(first_text(&url), "Generated url QR code");
    let url = url.structured_content.expect("structured_content");
    assert_eq!(url["qrData"]["content"], "https://example.com");

    let vcard = vcard.structured_content.expect("structured_content");
    assert_eq!(
        vcard["qrData"]["content"],
        "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nN:Doe;Jane;;;\nEND:VCARD"
    );
    assert_eq!(vcard["qrData"]["displayTitle"], "vCard QR Code");
    Ok(())
}

#[tokio::test]
async fn text_variant_echoes_input() -> Result<()> {
    let (factory, _) = counting_factory(ToolVariant::Text);
    let (client, server_task) = connect(factory.create()).await?;

    let tools = client.list_tools(None).await?;
    let properties = tools.tools[0]
        .input_schema
        .get("properties")
        .expect("schema properties")
        .clone();
    assert!(properties.get("text").is_some(), "schema: {properties}");
    assert_eq!(tools.tools[0].title.as_deref(), Some("Generate QR Code"));

    let result = call(&client, json!({ "text": "hello world" })).await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_eq!(first_text(&result), "QR code generated for: hello world");
    let structured = result.structured_content.expect("structured_content");
    assert_eq!(structured["text"], "hello world");
    assert_eq!(structured["resourceUri"], APP_UI_URI);
    Ok(())
}

#[tokio::test]
async fn empty_content_is_invalid_params() -> Result<()> {
    let (factory, _) = counting_factory(ToolVariant::Typed);
    let (client, server_task) = connect(factory.create()).await?;

    let err = call(&client, json!({ "type": "email", "content": "" }))
        .await
        .expect_err("empty content must fail");
    let _ = client.cancel().await;
    let _ = server_task.await;

    match err {
        ServiceError::McpError(data) => {
            assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
            let details = data.data.expect("error data");
            assert_eq!(details["field"], "content");
            assert_eq!(details["code"], "EMPTY_CONTENT");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unknown_type_is_rejected() -> Result<()> {
    let (factory, _) = counting_factory(ToolVariant::Typed);
    let (client, server_task) = connect(factory.create()).await?;

    let err = call(&client, json!({ "type": "barcode", "content": "123" }))
        .await
        .expect_err("unknown type must fail");
    let _ = client.cancel().await;
    let _ = server_task.await;

    match err {
        ServiceError::McpError(data) => assert_eq!(data.code, ErrorCode::INVALID_PARAMS),
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn instance_is_released_once_after_session_ends() -> Result<()> {
    let (factory, released) = counting_factory(ToolVariant::Typed);
    let (client, server_task) = connect(factory.create()).await?;

    call(&client, json!({ "type": "text", "content": "hi" })).await?;
    assert_eq!(released.load(Ordering::SeqCst), 0);

    let _ = client.cancel().await;
    let _ = server_task.await;
    wait_for_releases(&released, 1).await?;
    assert_eq!(released.load(Ordering::SeqCst), 1);
    Ok(())
}

//! ApiClient tests against a mocked API server
//!
//! The API server answers `{code, msg, data}` with `code == 0` on success.

use std::sync::Arc;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxhelper_sdk::client::Transport;
use wxhelper_sdk::{ApiClient, WxError};

fn create_test_client(base_url: &str) -> ApiClient {
    let transport = Transport::builder().base_url(base_url).build().unwrap();
    ApiClient::new(Arc::new(transport))
}

fn ok_json(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "code": 0,
        "msg": "ok",
        "data": data
    })
}

async fn mount(server: &MockServer, http_method: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_user_info() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "GET",
        "/api/userinfo",
        ok_json(serde_json::json!({
            "wxid": "wxid_self",
            "account": "alice_wx",
            "name": "Alice",
            "headImage": "https://wx.qlogo.cn/x"
        })),
    )
    .await;

    let client = create_test_client(&mock_server.uri());
    let account = client.get_user_info().await.unwrap();

    assert_eq!(account.wxid, "wxid_self");
    assert_eq!(account.account, "alice_wx");
    assert_eq!(account.name, "Alice");
}

#[tokio::test]
async fn test_get_contact_list_keeps_order_and_duplicates() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "GET",
        "/api/contacts",
        ok_json(serde_json::json!([
            {"wxid": "wxid_b", "nickname": "Bob"},
            {"wxid": "wxid_a", "nickname": "Ann"},
            {"wxid": "wxid_b", "nickname": "Bob"}
        ])),
    )
    .await;

    let client = create_test_client(&mock_server.uri());
    let members = client.get_contact_list().await.unwrap();

    let ids: Vec<&str> = members.iter().map(|m| m.wxid.as_str()).collect();
    assert_eq!(ids, vec!["wxid_b", "wxid_a", "wxid_b"]);
}

#[tokio::test]
async fn test_send_text_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sendtext"))
        .and(body_json(serde_json::json!({"to": "alice", "content": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "msg": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    assert!(client.send_text("alice", "hi").await.is_ok());
}

#[tokio::test]
async fn test_send_text_rejected_surfaces_server_message() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "POST",
        "/api/sendtext",
        serde_json::json!({"code": 1, "msg": "blocked"}),
    )
    .await;

    let client = create_test_client(&mock_server.uri());
    let err = client.send_text("alice", "hi").await.unwrap_err();

    match err {
        WxError::Api {
            operation,
            code,
            message,
        } => {
            assert_eq!(operation, "send_text");
            assert_eq!(code, 1);
            assert_eq!(message, "blocked");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_image_is_inline_base64() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sendimage"))
        .and(body_json(serde_json::json!({"to": "alice", "image": "iVBORw0K"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "msg": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let mut image: &[u8] = b"\x89PNG\r\n";
    client.send_image("alice", &mut image).await.unwrap();
}

#[tokio::test]
async fn test_send_image_read_failure_skips_request() {
    struct FailingReader;

    impl tokio::io::AsyncRead for FailingReader {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "camera unplugged",
            )))
        }
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sendimage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client
        .send_image("alice", &mut FailingReader)
        .await
        .unwrap_err();
    assert!(err.is_io());
}

#[tokio::test]
async fn test_sync_message_returns_messages_verbatim() {
    let mock_server = MockServer::start().await;
    // A non-zero code is still returned as data: sync_message is unchecked.
    mount(
        &mock_server,
        "GET",
        "/api/syncmessage",
        serde_json::json!({
            "code": 7,
            "msg": "",
            "data": [
                {"msgId": 1, "fromUser": "wxid_a", "content": "one", "type": 1},
                {"msgId": 2, "fromUser": "wxid_b", "content": "two", "type": 3}
            ]
        }),
    )
    .await;

    let client = create_test_client(&mock_server.uri());
    let messages = client.sync_message().await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "one");
    assert_eq!(messages[1].msg_type, 3);
}

#[tokio::test]
async fn test_sync_message_empty_data() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "GET", "/api/syncmessage", ok_json(serde_json::json!([]))).await;

    let client = create_test_client(&mock_server.uri());
    assert!(client.sync_message().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error_for_every_operation() {
    let mock_server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let mut image: &[u8] = b"img";

    assert!(client.check_login().await.unwrap_err().is_decode());
    assert!(client.get_user_info().await.unwrap_err().is_decode());
    assert!(client.get_contact_list().await.unwrap_err().is_decode());
    assert!(client.send_text("a", "b").await.unwrap_err().is_decode());
    assert!(client
        .send_image("a", &mut image)
        .await
        .unwrap_err()
        .is_decode());
    assert!(client.sync_message().await.unwrap_err().is_decode());
}

#[tokio::test]
async fn test_wrong_envelope_shape_is_decode_error() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "GET",
        "/api/checklogin",
        serde_json::json!({"code": 0, "data": "yes"}),
    )
    .await;

    let client = create_test_client(&mock_server.uri());
    assert!(client.check_login().await.unwrap_err().is_decode());
}

#[tokio::test]
async fn test_transport_failure_is_returned_unchanged() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = create_test_client(&format!("http://{addr}"));

    assert!(matches!(
        client.check_login().await,
        Err(WxError::Http(_))
    ));
    assert!(matches!(
        client.send_text("alice", "hi").await,
        Err(WxError::Http(_))
    ));
    assert!(matches!(
        client.sync_message().await,
        Err(WxError::Http(_))
    ));
}

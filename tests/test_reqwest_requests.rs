mod common;

use std::sync::Arc;
use std::time::Duration;

use mcp_mealie::client::{
    ApiError, ApiRequests, ReqwestRequests, ShoppingApi, ShoppingListItemCreate,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Accepts one connection, answers with `status_line` and `body`, and hands
/// back the raw request it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = socket.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        if let Some(end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buffer[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn request_line(request: &str) -> &str {
    request.lines().next().unwrap_or_default()
}

fn request_body(request: &str) -> Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request has a head");
    serde_json::from_str(body).expect("request body is JSON")
}

#[tokio::test]
async fn test_error_status_keeps_server_body() {
    common::init_test_logging();
    let (base_url, server) = serve_once("422 Unprocessable Entity", r#"{"detail":"nope"}"#).await;
    let requests = ReqwestRequests::new(base_url).with_token("secret-token");

    let error = requests
        .delete("/api/households/shopping/items?ids=a&ids=b&")
        .await
        .expect_err("422 must be an error");
    let request = server.await.unwrap();

    assert_eq!(
        request_line(&request),
        "DELETE /api/households/shopping/items?ids=a&ids=b& HTTP/1.1"
    );
    assert!(
        request
            .to_lowercase()
            .contains("authorization: bearer secret-token"),
        "missing bearer header in {request:?}"
    );
    match error {
        ApiError::Status {
            status, path, body, ..
        } => {
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(path, "/api/households/shopping/items?ids=a&ids=b&");
            assert_eq!(body, r#"{"detail":"nope"}"#);
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_token_sends_no_authorization_header() {
    let (base_url, server) = serve_once("200 OK", r#"{"id":"list-1"}"#).await;
    let requests = ReqwestRequests::new(base_url);

    let response = requests
        .get("/api/households/shopping/lists/list-1")
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(
        request_line(&request),
        "GET /api/households/shopping/lists/list-1 HTTP/1.1"
    );
    assert!(!request.to_lowercase().contains("authorization:"));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, r#"{"id":"list-1"}"#);
}

#[tokio::test]
async fn test_bulk_create_sends_json_array_over_the_wire() {
    let (base_url, server) = serve_once(
        "201 Created",
        r#"{"createdItems":[],"updatedItems":[],"deletedItems":[]}"#,
    )
    .await;
    let api = ShoppingApi::new(Arc::new(ReqwestRequests::new(base_url).with_token("tok")));
    let items = vec![
        ShoppingListItemCreate::note("list-1", "milk"),
        ShoppingListItemCreate::note("list-1", "eggs"),
    ];

    let response = api.items.create_many(&items).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(
        request_line(&request),
        "POST /api/households/shopping/items/create-bulk HTTP/1.1"
    );
    assert!(request.to_lowercase().contains("content-type: application/json"));
    let body = request_body(&request);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["note"], json!("eggs"));
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.data().unwrap().created_items.is_empty());
}

#[tokio::test]
async fn test_slow_server_hits_request_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let _ = read_request(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let requests =
        ReqwestRequests::new(format!("http://{}", addr)).with_timeout(Duration::from_millis(200));

    let error = requests
        .get("/api/households/shopping/lists")
        .await
        .expect_err("request should time out");
    server.abort();

    match error {
        ApiError::Network { source, .. } => {
            assert!(source.is_timeout(), "expected a timeout, got {source}")
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

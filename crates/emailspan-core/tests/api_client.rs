//! Integration tests for the API client.
//!
//! These tests run the client against a scripted HTTP server on a local
//! socket. Each connection gets the next canned response and is closed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use emailspan_core::{
    ApiClient, ApiConfig, Error, ProbeEmail, ResultStatus, SendEmailRequest, TestStatus,
    Workflow, creation_error_message,
};

/// A request as the mock server saw it.
#[derive(Debug)]
struct Recorded {
    method: String,
    path: String,
    body: Option<Value>,
}

/// Scripted backend: answers connections in order with `responses`.
struct MockServer {
    base_url: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl MockServer {
    async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut recorded = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                recorded.push(read_request(&mut socket).await);

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len(),
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            recorded
        });

        Self {
            base_url: format!("http://{addr}/api"),
            handle,
        }
    }

    fn client(&self) -> ApiClient {
        let config = ApiConfig::new(&self.base_url)
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        ApiClient::new(&config).unwrap()
    }

    async fn requests(self) -> Vec<Recorded> {
        self.handle.await.unwrap()
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap().split_whitespace();
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .map_or(0, |(_, value)| value.trim().parse::<usize>().unwrap());

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = &buf[header_end..header_end + content_length];
    Recorded {
        method,
        path,
        body: (!body.is_empty()).then(|| serde_json::from_slice(body).unwrap()),
    }
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn ok(body: &Value) -> (u16, String) {
    (200, body.to_string())
}

#[tokio::test]
async fn test_start_test_identifies_then_creates() {
    let server = MockServer::start(vec![
        ok(&json!({"success": true})),
        (
            201,
            json!({"data": {"testCode": "ES-100", "userId": "u@example.com", "status": "pending"}})
                .to_string(),
        ),
    ])
    .await;

    let test = server.client().start_test("u@example.com").await.unwrap();
    assert_eq!(test.test_code, "ES-100");
    assert_eq!(test.status, TestStatus::Pending);

    let requests = server.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/auth/identify");
    assert_eq!(requests[0].body, Some(json!({"email": "u@example.com"})));
    assert_eq!(requests[1].path, "/api/tests/create");
    assert_eq!(requests[1].body, Some(json!({"userEmail": "u@example.com"})));
}

#[tokio::test]
async fn test_failed_identify_skips_create() {
    let server = MockServer::start(vec![(
        429,
        json!({"message": "rate limited"}).to_string(),
    )])
    .await;

    let error = server.client().start_test("u@example.com").await.unwrap_err();
    assert!(matches!(error, Error::Status { .. }));
    assert_eq!(creation_error_message(&error), "rate limited");

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/auth/identify");
}

#[tokio::test]
async fn test_error_without_message_uses_generic_banner() {
    let server = MockServer::start(vec![(500, "upstream exploded".to_string())]).await;

    let error = server.client().create_test("u@example.com").await.unwrap_err();
    match &error {
        Error::Status { status, body, message } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream exploded");
            assert!(message.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(creation_error_message(&error), "Failed to create test");
    server.requests().await;
}

#[tokio::test]
async fn test_get_test_reads_results() {
    let server = MockServer::start(vec![ok(&json!({
        "data": {
            "testCode": "ES-7",
            "status": "completed",
            "overallScore": 75,
            "results": [
                {"provider": "Gmail", "email": "probe@gmail.com", "status": "delivered", "folder": "Inbox"},
                {"provider": "Outlook", "status": "spam"}
            ]
        }
    }))])
    .await;

    let test = server.client().get_test("ES-7").await.unwrap();
    assert_eq!(test.status, TestStatus::Completed);
    assert_eq!(test.overall_score, Some(75.0));
    assert_eq!(test.results.len(), 2);
    assert_eq!(test.results[1].status, ResultStatus::Spam);

    let requests = server.requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/tests/ES-7");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_process_accepts_result_envelope() {
    let server = MockServer::start(vec![
        ok(&json!({"result": {"status": "completed", "overallScore": 50}})),
        ok(&json!({"success": true})),
    ])
    .await;
    let api = server.client();

    let update = api.process_test("ES-3").await.unwrap().unwrap();
    assert_eq!(update.status, Some(TestStatus::Completed));
    assert_eq!(update.overall_score, Some(50.0));

    assert!(api.process_test("ES-3").await.unwrap().is_none());

    let requests = server.requests().await;
    assert_eq!(requests[0].path, "/api/tests/process");
    assert_eq!(requests[0].body, Some(json!({"testCode": "ES-3"})));
}

#[tokio::test]
async fn test_check_flow_reaches_report() {
    let server = MockServer::start(vec![
        ok(&json!({"data": {"testCode": "ES-11", "status": "pending"}})),
        ok(&json!({"data": {"status": "completed", "results": "not an array"}})),
    ])
    .await;
    let api = server.client();

    let mut workflow = Workflow::new();
    let test = api.create_test("u@example.com").await.unwrap();
    workflow.test_created(test, "u@example.com").unwrap();

    let update = api.process_test("ES-11").await.unwrap();
    workflow.check_completed(update.as_ref()).unwrap();

    let current = workflow.current_test().unwrap();
    assert_eq!(current.test_code, "ES-11");
    assert_eq!(current.status, TestStatus::Completed);
    assert!(current.results.is_empty());
    assert!(!workflow.should_auto_check());
    server.requests().await;
}

#[tokio::test]
async fn test_unusable_process_payload_keeps_previous_test() {
    let server = MockServer::start(vec![
        ok(&json!({"data": {"testCode": "ES-12", "status": "pending", "overallScore": 40}})),
        ok(&json!({"data": "processing"})),
    ])
    .await;
    let api = server.client();

    let mut workflow = Workflow::new();
    let test = api.create_test("u@example.com").await.unwrap();
    let before = test.clone();
    workflow.test_created(test, "u@example.com").unwrap();

    let update = api.process_test("ES-12").await.unwrap();
    assert!(update.is_none());
    workflow.check_completed(update.as_ref()).unwrap();

    assert_eq!(workflow.current_test().unwrap(), &before);
    assert!(!workflow.should_auto_check());
    server.requests().await;
}

#[tokio::test]
async fn test_send_probe_email_body() {
    let server = MockServer::start(vec![ok(&json!({"success": true}))]).await;

    let request = SendEmailRequest::from(ProbeEmail::compose("ES-5", "to@example.com"));
    server.client().send_test_email(&request).await.unwrap();

    let requests = server.requests().await;
    assert_eq!(requests[0].path, "/api/tests/send-email");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "to": "to@example.com",
            "subject": "[EmailSpan Test] ES-5",
            "text": "This is a deliverability test.\nTest Code: ES-5\nSent to: to@example.com",
            "testCode": "ES-5",
            "fromName": "EmailSpan",
        }))
    );
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start(vec![
        ok(&json!({"status": "ok"})),
        (503, json!({"status": "down"}).to_string()),
    ])
    .await;
    let api = server.client();

    assert!(api.check_connection().await);
    assert!(!api.check_connection().await);

    let requests = server.requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/health");
}

#[tokio::test]
async fn test_closed_port_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig::new(&format!("http://{addr}/api"))
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    let api = ApiClient::new(&config).unwrap();

    let error = api.get_test("ES-1").await.unwrap_err();
    assert!(matches!(error, Error::Unreachable(_)), "got {error:?}");
    assert_eq!(
        error.to_string(),
        "Cannot connect to server. Please ensure the backend is running."
    );
    assert!(!api.check_connection().await);
}

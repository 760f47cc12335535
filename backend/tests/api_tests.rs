use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;

use site_backend::{
    build_router,
    config::Config,
    handlers::chat_handlers::{MAX_CHAT_MESSAGE_CHARS, MAX_UPLOAD_BYTES},
    utils::chat_provider::{ChatError, ChatProvider, FALLBACK_REPLY},
    utils::mailer::{ContactEnquiry, MailError, Mailer},
    AppState,
};

mock! {
    pub SiteMailer {}
    #[async_trait]
    impl Mailer for SiteMailer {
        async fn send_enquiry(&self, enquiry: ContactEnquiry) -> Result<(), MailError>;
    }
}

mock! {
    pub Chat {}
    #[async_trait]
    impl ChatProvider for Chat {
        async fn complete(&self, message: String) -> Result<String, ChatError>;
    }
}

fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([("ENVIRONMENT", "development")]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

fn app(mailer: MockSiteMailer, chat: MockChat) -> Router {
    build_router(Arc::new(AppState {
        config: test_config(),
        mailer: Arc::new(mailer),
        chat: Arc::new(chat),
    }))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(field: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
    let boundary = "X-SITE-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/chat/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = app(MockSiteMailer::new(), MockChat::new());
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn contact_sends_validated_enquiry() {
    let mut mailer = MockSiteMailer::new();
    mailer
        .expect_send_enquiry()
        .withf(|enquiry: &ContactEnquiry| {
            enquiry.name == "Priya" && enquiry.email == "priya@example.co.uk" && enquiry.message == "Can we talk about a data audit?"
        })
        .times(1)
        .returning(|_| Ok(()));

    let response = app(mailer, MockChat::new())
        .oneshot(json_request(
            "/api/contact",
            json!({
                "name": " Priya ",
                "email": "priya@example.co.uk",
                "message": "Can we talk about a data audit?"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));
}

#[tokio::test]
async fn contact_rejects_invalid_email_without_sending() {
    let mut mailer = MockSiteMailer::new();
    mailer.expect_send_enquiry().never();

    let response = app(mailer, MockChat::new())
        .oneshot(json_request(
            "/api/contact",
            json!({"name": "Priya", "email": "priya", "message": "Hi"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn contact_rejects_address_the_mailer_cannot_parse() {
    let mut mailer = MockSiteMailer::new();
    mailer.expect_send_enquiry().never();

    let response = app(mailer, MockChat::new())
        .oneshot(json_request(
            "/api/contact",
            json!({"name": "Priya", "email": "priya,x@example.com", "message": "Hi"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Please enter a valid email address"})
    );
}

#[tokio::test]
async fn contact_reports_generic_failure_when_mail_fails() {
    let mut mailer = MockSiteMailer::new();
    mailer
        .expect_send_enquiry()
        .returning(|_| Err(MailError::Transport("connection refused".to_string())));

    let response = app(mailer, MockChat::new())
        .oneshot(json_request(
            "/api/contact",
            json!({"name": "Priya", "email": "priya@example.co.uk", "message": "Hi"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "Failed to send message"}));
}

#[tokio::test]
async fn chat_returns_provider_reply() {
    let mut chat = MockChat::new();
    chat.expect_complete()
        .withf(|message: &String| message == "What do you do?")
        .times(1)
        .returning(|_| Ok("We help teams make sense of their data.".to_string()));

    let response = app(MockSiteMailer::new(), chat)
        .oneshot(json_request("/api/chat", json!({"message": "  What do you do?  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"reply": "We help teams make sense of their data."})
    );
}

#[tokio::test]
async fn chat_falls_back_when_provider_fails() {
    let mut chat = MockChat::new();
    chat.expect_complete()
        .returning(|_| Err(ChatError::Completion("upstream 502".to_string())));

    let response = app(MockSiteMailer::new(), chat)
        .oneshot(json_request("/api/chat", json!({"message": "Hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"reply": FALLBACK_REPLY}));
}

#[tokio::test]
async fn chat_rejects_empty_message() {
    let mut chat = MockChat::new();
    chat.expect_complete().never();

    let response = app(MockSiteMailer::new(), chat)
        .oneshot(json_request("/api/chat", json!({"message": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_rejects_overlong_message() {
    let mut chat = MockChat::new();
    chat.expect_complete().never();

    let long = "a".repeat(MAX_CHAT_MESSAGE_CHARS + 1);
    let response = app(MockSiteMailer::new(), chat)
        .oneshot(json_request("/api/chat", json!({"message": long})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Message is too long"}));
}

#[tokio::test]
async fn upload_acknowledges_file() {
    let response = app(MockSiteMailer::new(), MockChat::new())
        .oneshot(multipart_request("file", "brief.pdf", b"%PDF-1.4 test"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply = body_json(response).await["reply"].as_str().unwrap().to_string();
    assert!(reply.contains("brief.pdf"));
    assert!(reply.contains("13 bytes"));
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let response = app(MockSiteMailer::new(), MockChat::new())
        .oneshot(multipart_request("attachment", "brief.pdf", b"data"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "No file provided"}));
}

#[tokio::test]
async fn upload_over_limit_is_rejected() {
    let contents = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let response = app(MockSiteMailer::new(), MockChat::new())
        .oneshot(multipart_request("file", "big.bin", &contents))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await, json!({"error": "File is too large"}));
}

#[tokio::test]
async fn upload_beyond_body_limit_is_rejected() {
    let contents = vec![0u8; MAX_UPLOAD_BYTES + 128 * 1024];
    let response = app(MockSiteMailer::new(), MockChat::new())
        .oneshot(multipart_request("file", "huge.bin", &contents))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

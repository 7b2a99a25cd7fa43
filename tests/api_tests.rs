use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use inlet::web::AppState;
use inlet::{Config, Database};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn test_app() -> Router {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let name = format!("api_test_{}", id);
    let db = Database::open_memory(&name).expect("Failed to create test database");
    db.migrate().expect("Failed to run migrations");

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_path: name,
    };
    let state = Arc::new(AppState::new(config, db));

    inlet::web::router(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4321))))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn post_webhook(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_capture_acknowledges_with_id_and_timestamp() {
    let app = test_app();
    let (status, body) = send(&app, post_webhook(r#"{"a":1}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["id"], json!(1));
    let received_at = body["received_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(received_at).is_ok());
}

#[tokio::test]
async fn test_capture_roundtrip_preserves_json_body() {
    let app = test_app();
    let (_, ack) = send(&app, post_webhook(r#"{ "a" : 1 }"#)).await;
    let id = ack["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/webhooks/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let item = &body["item"];
    assert_eq!(item["raw_body"], json!(r#"{ "a" : 1 }"#));
    let parsed: Value = serde_json::from_str(item["body_json"].as_str().unwrap()).unwrap();
    assert_eq!(parsed, json!({ "a": 1 }));
}

#[tokio::test]
async fn test_capture_accepts_non_json_body() {
    let app = test_app();
    let (status, ack) = send(&app, post_webhook("hello")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/webhooks/{}", ack["id"].as_i64().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(body["item"]["raw_body"], json!("hello"));
    assert!(body["item"]["body_json"].is_null());
}

#[tokio::test]
async fn test_forwarded_header_wins_over_peer_address() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("X-Forwarded-For", "203.0.113.5")
        .body(Body::empty())
        .unwrap();
    let (_, ack) = send(&app, request).await;

    let (_, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/webhooks/{}", ack["id"].as_i64().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["item"]["source_ip"], json!("203.0.113.5"));

    let (_, ack) = send(&app, post_webhook("")).await;
    let (_, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/webhooks/{}", ack["id"].as_i64().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["item"]["source_ip"], json!("127.0.0.1"));
}

#[tokio::test]
async fn test_non_utf8_body_is_decoded_lossily() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .body(Body::from(vec![0xff, b'h', b'i']))
        .unwrap();
    let (status, ack) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Request::builder()
            .uri(format!("/api/webhooks/{}", ack["id"].as_i64().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["item"]["raw_body"], json!("\u{fffd}hi"));
    assert!(body["item"]["body_json"].is_null());
}

#[tokio::test]
async fn test_home_page_renders() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("inlet"));
    assert!(html.contains("0"));
}

#[tokio::test]
async fn test_missing_capture_returns_structured_404() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/webhooks/9999")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "not_found" }));
}

#[tokio::test]
async fn test_listing_clamps_limit_and_omits_headers() {
    let app = test_app();
    for i in 0..5 {
        send(&app, post_webhook(&format!("payload {}", i))).await;
    }

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/webhooks?limit=3")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], json!(5));
    assert_eq!(items[2]["id"], json!(3));
    assert!(items[0].get("headers_json").is_none());

    // Garbage limit falls back to the default of 50
    let (_, body) = send(
        &app,
        Request::builder()
            .uri("/api/webhooks?limit=abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 5);

    // Zero clamps up to one
    let (_, body) = send(
        &app,
        Request::builder()
            .uri("/api/webhooks?limit=0")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    // The single-item view still carries header data
    let (_, body) = send(
        &app,
        Request::builder()
            .uri("/api/webhooks/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert!(body["item"].get("headers_json").is_some());
}

#[tokio::test]
async fn test_delete_all_requires_confirmation_header() {
    let app = test_app();
    for i in 0..3 {
        send(&app, post_webhook(&format!("payload {}", i))).await;
    }

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/webhooks")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "missing_confirmation_header" }));

    // A wrong value is rejected the same way
    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/webhooks")
            .header("X-Confirm", "yes")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Store is untouched
    let (_, body) = send(
        &app,
        Request::builder()
            .uri("/api/webhooks")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_confirmed_delete_all_reports_count() {
    let app = test_app();
    for i in 0..3 {
        send(&app, post_webhook(&format!("payload {}", i))).await;
    }

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/webhooks")
            .header("X-Confirm", "YES")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "deleted": 3 }));

    // The id sequence survives the purge
    let (_, ack) = send(&app, post_webhook("after purge")).await;
    assert_eq!(ack["id"], json!(4));
}

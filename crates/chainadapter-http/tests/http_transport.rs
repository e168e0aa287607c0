//! `HttpCallTransport` + `Requester` against a local stub node.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use chainadapter_http::{
    Backoff, CallTransport, ConstantCallRequest, HttpCallTransport, Requester, RetryConfig, TransportError,
};

// ─── Stub node ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Stub {
    hits: Arc<AtomicU32>,
}

async fn ok(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "result": {"result": true},
        "constant_result": [format!("{:0>64}", "5")],
        "echo": body,
    }))
}

async fn flaky(State(stub): State<Stub>) -> (StatusCode, Json<Value>) {
    let n = stub.hits.fetch_add(1, Ordering::SeqCst) + 1;
    if n == 1 {
        (StatusCode::BAD_GATEWAY, Json(json!({"error": "upstream"})))
    } else {
        (StatusCode::OK, Json(json!({"constant_result": ["00"]})))
    }
}

async fn broken(State(stub): State<Stub>) -> StatusCode {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_stub() -> (String, Stub) {
    let stub = Stub::default();
    let app = Router::new()
        .route("/ok", post(ok))
        .route("/flaky", post(flaky))
        .route("/broken", post(broken))
        .with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), stub)
}

fn call() -> ConstantCallRequest {
    ConstantCallRequest {
        owner_address: "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb".into(),
        contract_address: "TBSo1pthwZJkkXLwfNUC3wzKG2K7wt2Zvg".into(),
        function_selector: "confirmedTokensForUser(address)".into(),
        parameter: "00".repeat(32),
        visible: true,
    }
}

fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff: Backoff::Exponential {
            initial: Duration::from_millis(1),
            max: Duration::from_millis(5),
            multiplier: 2.0,
        },
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_json_body_and_parses_response() {
    let (base, stub) = spawn_stub().await;
    let transport = HttpCallTransport::default_for(format!("{base}/ok")).unwrap();

    let resp = transport.send(&call()).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.constant_result().map(str::len), Some(64));
    assert_eq!(resp.data["echo"]["function_selector"], "confirmedTokensForUser(address)");
    assert_eq!(resp.data["echo"]["visible"], true);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_2xx_maps_to_status_error() {
    let (base, _stub) = spawn_stub().await;
    let transport = HttpCallTransport::default_for(format!("{base}/broken")).unwrap();

    let err = transport.send(&call()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn requester_retries_bad_gateway() {
    let (base, stub) = spawn_stub().await;
    let transport = Arc::new(HttpCallTransport::default_for(format!("{base}/flaky")).unwrap());
    let requester = Requester::new(transport, fast_retry(3));

    let resp = requester.request(&call()).await.unwrap();
    assert_eq!(resp.constant_result(), Some("00"));
    assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn requester_surfaces_last_error() {
    let (base, stub) = spawn_stub().await;
    let transport = Arc::new(HttpCallTransport::default_for(format!("{base}/broken")).unwrap());
    let requester = Requester::new(transport, fast_retry(1));

    let err = requester.request(&call()).await.unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 500, .. }));
    assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
}

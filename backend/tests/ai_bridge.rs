use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use tripgen_backend::transport::ReqwestTransport;
use tripgen_shared::{
    AiConfig, BridgeError, TripForm, bridge::ChatRequest, call_external_generator,
};

async fn completions(headers: HeaderMap, Json(req): Json<ChatRequest>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer secret");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "bad key"})),
        );
    }
    let user = req
        .messages
        .iter()
        .find(|m| m.role == "user")
        .map(|m| m.content.clone())
        .unwrap_or_default();
    let reply = format!("  {} tokens for: {}  ", req.max_tokens, user.lines().next().unwrap_or(""));
    (
        StatusCode::OK,
        Json(json!({"choices": [{"message": {"role": "assistant", "content": reply}}]})),
    )
}

async fn spawn_mock() -> String {
    let app = Router::new().route("/v1/chat/completions", post(completions));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1/chat/completions")
}

fn paris() -> tripgen_shared::TripRequest {
    TripForm {
        city: "Paris".into(),
        days: "2".into(),
        ..TripForm::default()
    }
    .validate()
    .unwrap()
}

#[tokio::test]
async fn generator_returns_trimmed_completion() {
    let endpoint = spawn_mock().await;
    let config = AiConfig::new(endpoint, "gpt-test", "secret", 321).unwrap();

    let text = call_external_generator(&ReqwestTransport::new(), &config, &paris())
        .await
        .unwrap();
    assert_eq!(
        text,
        "321 tokens for: Plan a trip to Paris for 2 days with a medium budget."
    );
}

#[tokio::test]
async fn generator_surfaces_error_status_and_body() {
    let endpoint = spawn_mock().await;
    let config = AiConfig::new(endpoint, "gpt-test", "wrong", 100).unwrap();

    let err = call_external_generator(&ReqwestTransport::new(), &config, &paris())
        .await
        .unwrap_err();
    match err {
        BridgeError::Status { status, ref body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("AI error: 401"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = AiConfig::new(format!("http://{addr}/"), "gpt-test", "secret", 100).unwrap();

    let err = call_external_generator(&ReqwestTransport::new(), &config, &paris())
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Transport(_)));
}

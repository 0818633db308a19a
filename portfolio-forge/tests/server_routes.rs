use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use portfolio_forge::config::{GeminiConfig, GithubConfig, VercelConfig};
use portfolio_forge::gemini::GeminiFormatter;
use portfolio_forge::github::GithubClient;
use portfolio_forge::payload::MAX_ASSET_BYTES;
use portfolio_forge::server::{router, AppState};
use portfolio_forge::templates::TemplateDirs;
use portfolio_forge::vercel::VercelClient;
use serde_json::{json, Value};
use tower::ServiceExt;

/// State with syntactically valid credentials and a missing template root.
/// Good enough for routes that never reach a remote host.
fn offline_state() -> Arc<AppState> {
    Arc::new(AppState {
        formatter: GeminiFormatter::new(&GeminiConfig {
            api_key: "AIza-test".to_string(),
            model: "gemini-1.5-flash".to_string(),
        }),
        repo_host: GithubClient::new(&GithubConfig {
            token: "ghp_test".to_string(),
            username: "octo".to_string(),
        }),
        deploy_host: VercelClient::new(&VercelConfig {
            token: "vc_test".to_string(),
        }),
        templates: TemplateDirs::new(std::path::Path::new("/nonexistent/templates")),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn echo_endpoint_reflects_the_body() {
    let app = router(offline_state());
    let body = json!({ "hello": "world" });

    let response = app.oneshot(post_json("/api/test", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply = body_json(response).await;
    assert_eq!(reply["message"], json!("Request body logged"));
    assert_eq!(reply["receivedData"], body);
}

#[tokio::test]
async fn oversized_embedded_asset_is_rejected_before_the_pipeline() {
    let app = router(offline_state());
    let encoded = STANDARD.encode(vec![0u8; MAX_ASSET_BYTES + 1]);
    let body = json!({
        "data": {
            "name": "Ada",
            "files": { "profileImage": format!("data:image/png;base64,{encoded}") }
        }
    });

    let response = app
        .oneshot(post_json("/api/createPortfolio", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let reply = body_json(response).await;
    assert_eq!(
        reply["error"],
        json!("Profile image size exceeds limit of 5MB")
    );
}

#[tokio::test]
async fn unreadable_templates_surface_as_a_classified_failure() {
    let app = router(offline_state());
    let body = json!({ "data": { "name": "Ada" } });

    let response = app
        .oneshot(post_json("/api/createPortfolio", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let reply = body_json(response).await;
    assert_eq!(reply["success"], json!(false));
    assert_eq!(reply["errorKind"], json!("configuration"));
    assert!(reply.get("templateRepoUrl").is_none());
}

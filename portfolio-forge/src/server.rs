//! HTTP front door: route wiring and request/response mapping.
//!
//! The routes are thin. `/api/createPortfolio` validates embedded assets,
//! loads the template sets and hands everything to the core pipeline; the
//! pipeline's single result becomes the single HTTP response (200 on
//! success, 500 on failure). Everything stateful lives in [`AppState`],
//! constructed once at startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use portfolio_forge_core::deploy::DeployOptions;
use portfolio_forge_core::error::PipelineError;
use portfolio_forge_core::pipeline::{Pipeline, PipelineResult};
use portfolio_forge_core::publish::PublishOptions;

use crate::gemini::GeminiFormatter;
use crate::github::GithubClient;
use crate::payload::{sanitize_embedded_assets, PayloadError};
use crate::templates::TemplateDirs;
use crate::vercel::VercelClient;

/// Inbound JSON body cap.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Per-process state: the three clients and the template locations,
/// constructed once and shared by reference.
pub struct AppState {
    pub formatter: GeminiFormatter,
    pub repo_host: GithubClient,
    pub deploy_host: VercelClient,
    pub templates: TemplateDirs,
}

#[derive(Debug, Deserialize)]
struct CreateRequest {
    data: serde_json::Value,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/test", post(echo))
        .route("/api/createPortfolio", post(create_portfolio))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Request-debugging endpoint: reflect the body back.
async fn echo(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Request body logged",
        "receivedData": body,
    }))
}

async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRequest>,
) -> Response {
    let mut raw = request.data;

    if let Err(e) = sanitize_embedded_assets(&mut raw) {
        let status = match e {
            PayloadError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            PayloadError::Invalid => StatusCode::BAD_REQUEST,
        };
        return (status, Json(json!({ "error": e.to_string() }))).into_response();
    }

    let result = run_pipeline(&state, &raw).await;
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result)).into_response()
}

/// Load the template sets and execute one pipeline run.
pub async fn run_pipeline(state: &AppState, raw: &serde_json::Value) -> PipelineResult {
    let (base, variant) = match state.templates.load() {
        Ok(sets) => sets,
        Err(e) => {
            return PipelineResult::failed(&PipelineError::Configuration(format!(
                "template directory is not readable: {e}"
            )));
        }
    };

    let pipeline = Pipeline {
        formatter: &state.formatter,
        repo_host: &state.repo_host,
        deploy_host: &state.deploy_host,
        publish: PublishOptions::default(),
        deploy: DeployOptions::default(),
    };
    pipeline.run(raw, &base, &variant).await
}

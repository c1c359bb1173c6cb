//! HTTP dispatcher for text records and token relevance visualization.
//!
//! ## Routes
//!
//! - `GET    /api/health`: `{ "ok": true, "version": "..." }`.
//! - `GET    /api/texts`: every record, ordered by id.
//! - `POST   /api/texts`: create from `{ "text": "..." }`.
//! - `GET    /api/texts/:id`: one record, `404` when absent.
//! - `PUT    /api/texts/:id`: replace text, `404` when absent.
//! - `DELETE /api/texts/:id`: `204` whether or not the record existed.
//! - `POST   /api/visualize`: relevance matrix for `{ "text": "..." }`.
//!
//! Text bodies are decoded strictly (`400` on malformed JSON). The visualize
//! body is decoded permissively: anything unreadable counts as empty text.
//! `Content-Type` is not checked on either.
//!
//! Every route accepts cross-origin calls from any origin, with credentials.

use std::sync::Arc;
use std::time::Instant;

use attnviz_core::{core_version, visualize, RelevanceMatrix, TextId, TextRecord};
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body shared by create, update and visualize.
#[derive(Debug, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub text: String,
}

/// Build the axum `Router` over explicitly constructed state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/texts", get(list_texts).post(create_text))
        .route(
            "/api/texts/:id",
            get(get_text).put(update_text).delete(delete_text),
        )
        .route("/api/visualize", post(visualize_text))
        .layer(cors_layer())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Any origin, any request header, credentials allowed.
///
/// Origin and headers are mirrored from the request because a literal `*`
/// is invalid alongside credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Serve the API on an already bound listener until `shutdown` resolves.
pub async fn serve(
    state: Arc<AppState>,
    listener: tokio::net::TcpListener,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "version": core_version() }))
}

async fn list_texts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TextRecord>>, ApiError> {
    let records = state.with_text_service(|service| service.list()).await?;
    Ok(Json(records))
}

async fn get_text(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TextRecord>, ApiError> {
    let id = parse_id(&raw_id)?;
    let record = state
        .with_text_service(move |service| service.get(id))
        .await?;
    Ok(Json(record))
}

async fn create_text(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TextRecord>, ApiError> {
    let payload = decode_strict(&body)?;
    let record = state
        .with_text_service(move |service| service.create(payload.text))
        .await?;
    Ok(Json(record))
}

async fn update_text(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<TextRecord>, ApiError> {
    let id = parse_id(&raw_id)?;
    let payload = decode_strict(&body)?;
    let record = state
        .with_text_service(move |service| service.update(id, payload.text))
        .await?;
    Ok(Json(record))
}

async fn delete_text(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .with_text_service(move |service| service.delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn visualize_text(State(state): State<Arc<AppState>>, body: Bytes) -> Json<RelevanceMatrix> {
    let payload = decode_lenient(&body);
    Json(visualize(state.scorer(), &payload.text))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api status={} method={} path={} http_status={} duration_ms={}",
        if response.status().is_server_error() { "error" } else { "ok" },
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

fn parse_id(raw: &str) -> Result<TextId, ApiError> {
    raw.parse::<TextId>()
        .map_err(|_| ApiError::Decode(format!("text id must be an integer, got `{raw}`")))
}

fn decode_strict(body: &[u8]) -> Result<TextPayload, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn decode_lenient(body: &[u8]) -> TextPayload {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!("event=visualize_decode module=api status=fallback error={err}");
        TextPayload::default()
    })
}

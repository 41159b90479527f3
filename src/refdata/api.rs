use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};

use super::models::{ReferenceItem, ReferenceKind, ReferencePatch};
use super::resolver::Resolver;
use crate::errors::ResolveError;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub resolver: Resolver,
}

pub type SharedState = Arc<AppState>;

// ── Error handling ────────────────────────────────────────────────────

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        tracing::error!(error = %err, "reference resolution failed");
        ApiError::Internal(INTERNAL_MESSAGE.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn parse_kind(raw: &str) -> Result<ReferenceKind, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown reference kind '{}'", raw)))
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/settings/departments", get(list_departments))
        .route("/api/categories", get(list_categories))
        .route("/api/priorities", get(list_priorities))
        .route("/api/statuses", get(list_statuses))
        .route("/api/reference/{kind}", get(list_reference))
        .route("/api/reference/{kind}/{id}", patch(update_reference))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn resolve_kind(
    state: &SharedState,
    kind: ReferenceKind,
) -> Result<Json<Vec<ReferenceItem>>, ApiError> {
    let resolved = state.resolver.resolve(kind).await?;
    Ok(Json(resolved.rows))
}

async fn list_departments(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ReferenceItem>>, ApiError> {
    resolve_kind(&state, ReferenceKind::Department).await
}

async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ReferenceItem>>, ApiError> {
    resolve_kind(&state, ReferenceKind::Category).await
}

async fn list_priorities(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ReferenceItem>>, ApiError> {
    resolve_kind(&state, ReferenceKind::Priority).await
}

async fn list_statuses(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ReferenceItem>>, ApiError> {
    resolve_kind(&state, ReferenceKind::Status).await
}

async fn list_reference(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<ReferenceItem>>, ApiError> {
    let kind = parse_kind(&kind)?;
    resolve_kind(&state, kind).await
}

async fn update_reference(
    State(state): State<SharedState>,
    path: Result<Path<(String, i64)>, PathRejection>,
    payload: Result<Json<ReferencePatch>, JsonRejection>,
) -> Result<Json<ReferenceItem>, ApiError> {
    let Path((kind, id)) = path?;
    let kind = parse_kind(&kind)?;
    let Json(req) = payload?;
    req.validate(kind).map_err(ApiError::BadRequest)?;

    let updated = state
        .resolver
        .store()
        .update(kind, id, req)
        .await
        .map_err(|e| {
            tracing::error!(%kind, id, error = %e, "reference update failed");
            ApiError::Internal(INTERNAL_MESSAGE.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", kind, id)))?;

    tracing::info!(%kind, id, name = %updated.name, "reference entry updated");
    Ok(Json(updated))
}

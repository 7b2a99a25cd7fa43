use crate::services::captures;
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const CONFIRM_HEADER: &str = "x-confirm";
const CONFIRM_VALUE: &str = "YES";

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/webhooks
pub async fn list_webhooks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let limit = captures::clamp_limit(params.limit.as_deref());
    let items = captures::list_recent(&state.db, limit)?;
    Ok(Json(json!({ "items": items })))
}

/// GET /api/webhooks/:id
pub async fn get_webhook(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    match captures::get_capture(&state.db, id)? {
        Some(item) => Ok(Json(json!({ "item": item }))),
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/webhooks
///
/// Destructive and irreversible; requires `X-Confirm: YES` exactly. The
/// header is a safeguard against accidental calls, not a security control.
pub async fn delete_webhooks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<serde_json::Value>> {
    let confirmed = headers
        .get(CONFIRM_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == CONFIRM_VALUE)
        .unwrap_or(false);

    if !confirmed {
        return Err(ApiError::MissingConfirmation);
    }

    let deleted = captures::delete_all(&state.db)?;
    Ok(Json(json!({ "ok": true, "deleted": deleted })))
}

use crate::models::NewCapture;
use crate::services::{captures, ingest};
use crate::web::error::ApiResult;
use crate::web::state::AppState;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

/// POST /webhook
///
/// Accepts arbitrary headers, arbitrary content type, and a body of any
/// shape within the route's size limit. A body that is not JSON is still
/// captured; only `body_json` stays empty.
pub async fn receive(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<serde_json::Value>> {
    let received_at = ingest::utc_now_iso();
    let source_ip = source_ip(&headers, peer);
    let headers_json = headers_to_json(&headers);
    let raw_body = String::from_utf8_lossy(&body).into_owned();
    let body_json = ingest::parse_body_json(&raw_body);

    let id = captures::insert_capture(
        &state.db,
        &NewCapture {
            received_at: received_at.clone(),
            source_ip,
            headers_json: Some(headers_json),
            body_json,
            raw_body,
        },
    )?;

    Ok(Json(json!({ "ok": true, "id": id, "received_at": received_at })))
}

/// Forwarding header first, socket peer second. The header value is stored
/// verbatim, no format validation.
fn source_ip(headers: &HeaderMap, peer: SocketAddr) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match forwarded {
        Some(v) => Some(v.to_string()),
        None => Some(peer.ip().to_string()),
    }
}

/// Compact JSON object of header name to value, one value per name. The
/// last occurrence of a duplicated name wins; values that are not valid
/// UTF-8 are skipped.
fn headers_to_json(headers: &HeaderMap) -> String {
    let mut map = serde_json::Map::new();
    for (name, value) in headers {
        if let Ok(v) = value.to_str() {
            map.insert(
                name.as_str().to_string(),
                serde_json::Value::String(v.to_string()),
            );
        }
    }
    serde_json::Value::Object(map).to_string()
}

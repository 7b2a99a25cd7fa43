use crate::services::captures;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let count = captures::count_captures(&state.db).unwrap_or(0);
    let page = include_str!("../../../templates/index.html")
        .replace("{{count}}", &count.to_string())
        .replace("{{db_path}}", &state.config.db_path);
    Html(page)
}

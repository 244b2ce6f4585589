use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ResetResponse {
    message: String,
}

pub async fn get_theta(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    Json(state.scoring().snapshot(&user_id).await).into_response()
}

pub async fn reset_theta(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    state.scoring().reset(&user_id).await;
    Json(ResetResponse {
        message: format!("IRT state reset for user {user_id}"),
    })
    .into_response()
}

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::AppError;
use crate::services::scoring::ScoreRequest;
use crate::state::AppState;

pub async fn score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return AppError::validation(rejection.body_text()).into_response();
        }
    };

    match state.scoring().score(request).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            tracing::debug!(error = %err, "score request rejected");
            AppError::from(err).into_response()
        }
    }
}

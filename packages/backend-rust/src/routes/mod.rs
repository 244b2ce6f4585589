mod health;
mod item_params;
mod score;
mod theta;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(score::score).fallback(method_not_allowed))
        .route(
            "/theta/:user_id",
            get(theta::get_theta)
                .delete(theta::reset_theta)
                .fallback(method_not_allowed),
        )
        .route(
            "/item-params",
            get(item_params::get_item_params).fallback(method_not_allowed),
        )
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "route not found").into_response()
}

async fn method_not_allowed() -> Response {
    json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        "method not allowed",
    )
    .into_response()
}

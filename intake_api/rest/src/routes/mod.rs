use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::models::ApiError;

pub mod contact;
pub mod lead;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred.",
    )
}

fn invalid_body(err: serde_json::Error) -> Response {
    debug!("failed to parse request body: {err}");
    error(StatusCode::BAD_REQUEST, "Invalid request body format.")
}

fn error(code: StatusCode, error: impl Serialize) -> Response {
    (code, Json(ApiError { error })).into_response()
}

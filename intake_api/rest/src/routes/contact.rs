use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use intake_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};

use super::{error, internal_server_error, invalid_body};
use crate::models::{contact::ApiContactSubmission, parse_body, ApiMessage};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(service: State<Arc<impl ContactFeatureService>>, body: Bytes) -> Response {
    if !service.is_configured() {
        return not_configured();
    }

    let submission = match parse_body::<ApiContactSubmission>(&body) {
        Ok(submission) => submission,
        Err(err) => return invalid_body(err),
    };

    match service.submit(submission.into()).await {
        Ok(ContactSubmitOutcome::Delivered) => Json(ApiMessage {
            message: "Message sent successfully!",
        })
        .into_response(),
        Ok(ContactSubmitOutcome::Absorbed) => Json(ApiMessage {
            message: "Message received.",
        })
        .into_response(),
        Err(ContactSubmitError::Validation(err)) => {
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(ContactSubmitError::NotConfigured) => not_configured(),
        Err(ContactSubmitError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

fn not_configured() -> Response {
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Server configuration error.",
    )
}

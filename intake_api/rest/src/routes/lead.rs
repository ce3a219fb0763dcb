use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use intake_core_lead_contracts::{LeadFeatureService, LeadSubmitError};

use super::{error, internal_server_error, invalid_body};
use crate::models::{lead::ApiLeadSubmission, parse_body, ApiMessage, ApiSuccess};

pub fn router(service: Arc<impl LeadFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/smart-form", routing::get(status).post(submit))
        .with_state(service)
}

async fn status() -> Response {
    Json(ApiMessage {
        message: "Lead intake endpoint is active.",
    })
    .into_response()
}

async fn submit(service: State<Arc<impl LeadFeatureService>>, body: Bytes) -> Response {
    let submission = match parse_body::<ApiLeadSubmission>(&body) {
        Ok(submission) => submission,
        Err(err) => return invalid_body(err),
    };

    match service.submit(submission.into()).await {
        // absorbed submissions get the same answer as stored ones
        Ok(_) => Json(ApiSuccess { success: true }).into_response(),
        Err(LeadSubmitError::Validation(err)) => error(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err @ LeadSubmitError::Datastore(_)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(LeadSubmitError::Other(err)) => internal_server_error(err),
    }
}

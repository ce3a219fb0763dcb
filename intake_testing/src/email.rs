use std::{net::IpAddr, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde_json::{json, Value};
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::Recorder;

const EMAILS_ROUTE: &str = "/emails";

/// Any email addressed to this recipient is rejected by the fake api.
pub const REJECTED_RECIPIENT: &str = "rejected@example.com";

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    outbox: Recorder,
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting email api testing server on {host}:{port}");
    info!("Email api endpoint: http://{host}:{port}/");
    info!("API key: {api_key:?}");
    info!("Emails sent to {REJECTED_RECIPIENT:?} are rejected");

    crate::serve(host, port, router(api_key, Recorder::default())).await
}

/// Starts the fake email api in the background, returning its endpoint and
/// the record of accepted emails.
pub async fn spawn(api_key: &str) -> anyhow::Result<(Url, Recorder)> {
    let outbox = Recorder::default();
    let url = crate::spawn(router(api_key.into(), outbox.clone())).await?;
    Ok((url, outbox))
}

fn router(api_key: String, outbox: Recorder) -> Router {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send))
        .with_state(AppState {
            api_key: api_key.into(),
            outbox,
        })
}

async fn send(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(email): Json<Value>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "))
        .is_some_and(|x| x == &*state.api_key);
    if !authorized {
        return error(StatusCode::FORBIDDEN, "invalid_api_key", "API key is invalid");
    }

    let recipients = email["to"].as_array().cloned().unwrap_or_default();
    if recipients.is_empty() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `to` field.",
        );
    }
    if recipients.iter().any(|x| x == REJECTED_RECIPIENT) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "The recipient has been rejected.",
        );
    }

    state.outbox.push(email);

    Json(json!({ "id": Uuid::new_v4() })).into_response()
}

fn error(status: StatusCode, name: &str, message: &str) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "name": name,
        "message": message,
    });
    (status, Json(body)).into_response()
}

use std::{net::IpAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde_json::{json, Value};
use tracing::info;
use url::Url;

use crate::Recorder;

const TABLE_ROUTE: &str = "/rest/v1/:table";

#[derive(Clone)]
struct AppState {
    key: Arc<str>,
    table: Arc<str>,
    rows: Recorder,
}

pub async fn start_server(host: IpAddr, port: u16, key: String, table: String) -> anyhow::Result<()> {
    info!("Starting datastore testing server on {host}:{port}");
    info!("Datastore url: http://{host}:{port}/");
    info!("Key: {key:?}");
    info!("Table: {table:?}");

    crate::serve(host, port, router(key, table, Recorder::default())).await
}

/// Starts the fake datastore in the background, returning its url and the
/// record of inserted rows.
pub async fn spawn(key: &str, table: &str) -> anyhow::Result<(Url, Recorder)> {
    let rows = Recorder::default();
    let url = crate::spawn(router(key.into(), table.into(), rows.clone())).await?;
    Ok((url, rows))
}

fn router(key: String, table: String, rows: Recorder) -> Router {
    Router::new()
        .route(TABLE_ROUTE, routing::post(insert))
        .with_state(AppState {
            key: key.into(),
            table: table.into(),
            rows,
        })
}

async fn insert(
    State(state): State<AppState>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> Response {
    let header_is = |name: header::HeaderName, expected: &str| {
        headers
            .get(name)
            .and_then(|x| x.to_str().ok())
            .is_some_and(|x| x == expected)
    };
    if !header_is(header::HeaderName::from_static("apikey"), &state.key)
        || !header_is(header::AUTHORIZATION, &format!("Bearer {}", state.key))
    {
        return error(
            StatusCode::UNAUTHORIZED,
            None,
            "Invalid API key".into(),
        );
    }

    if table != *state.table {
        return error(
            StatusCode::NOT_FOUND,
            Some("42P01"),
            format!("relation \"public.{table}\" does not exist"),
        );
    }

    if !row.is_object() {
        return error(
            StatusCode::BAD_REQUEST,
            Some("PGRST102"),
            "Empty or invalid json".into(),
        );
    }

    state.rows.push(row);

    StatusCode::CREATED.into_response()
}

fn error(status: StatusCode, code: Option<&str>, message: String) -> Response {
    let body = json!({
        "code": code,
        "details": null,
        "hint": null,
        "message": message,
    });
    (status, Json(body)).into_response()
}

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
};
use intake_api_rest::{RestServer, RestServerConfig};
use intake_core_contact_contracts::MockContactFeatureService;
use intake_core_lead_contracts::MockLeadFeatureService;
use serde_json::Value;
use tower::ServiceExt;

pub fn server(
    contact: MockContactFeatureService,
    lead: MockLeadFeatureService,
) -> RestServer<MockContactFeatureService, MockLeadFeatureService> {
    RestServer::new(
        RestServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        },
        contact,
        lead,
    )
}

pub async fn post(
    server: RestServer<MockContactFeatureService, MockLeadFeatureService>,
    uri: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    server.router().oneshot(request).await.unwrap()
}

pub async fn get(
    server: RestServer<MockContactFeatureService, MockLeadFeatureService>,
    uri: &str,
) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    server.router().oneshot(request).await.unwrap()
}

pub async fn json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

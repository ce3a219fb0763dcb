//! Fake versions of the external collaborators, used by the integration
//! tests and for running the site locally without any third party accounts.

use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use url::Url;

pub mod datastore;
pub mod email;

/// Append-only record of every payload a fake server accepted.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Value>>>);

impl Recorder {
    pub fn entries(&self) -> Vec<Value> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, value: Value) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value);
    }
}

async fn serve(host: IpAddr, port: u16, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// Serves `router` on an ephemeral local port in the background and returns
/// its base url.
async fn spawn(router: Router) -> anyhow::Result<Url> {
    let listener = TcpListener::bind((IpAddr::from([127, 0, 0, 1]), 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    format!("http://{addr}/")
        .parse()
        .context("Failed to build server url")
}

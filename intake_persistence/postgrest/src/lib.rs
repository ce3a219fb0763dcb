//! Persistence on a hosted Postgres database exposed through a PostgREST
//! api (as offered by Supabase).

use std::sync::Arc;

use anyhow::anyhow;
use intake_di::Build;
use intake_models::Sensitive;
use intake_persistence_contracts::Database;
use intake_utils::http::HttpClient;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

pub mod submission;

#[derive(Debug, Clone, Build)]
pub struct PostgrestDatabase {
    config: PostgrestDatabaseConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct PostgrestDatabaseConfig {
    pub url: Option<Arc<Url>>,
    pub key: Option<Sensitive<Arc<str>>>,
}

impl PostgrestDatabase {
    pub fn new(config: PostgrestDatabaseConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl Database for PostgrestDatabase {
    type Connection = PostgrestConnection;

    fn connect(&self) -> anyhow::Result<Self::Connection> {
        match (&self.config.url, &self.config.key) {
            (Some(url), Some(key)) => Ok(PostgrestConnection {
                client: self.client.clone(),
                url: Arc::clone(url),
                key: key.clone(),
            }),
            (url, key) => Err(anyhow!(
                "Missing datastore configuration (url: {}, key: {})",
                if url.is_some() { "set" } else { "missing" },
                if key.is_some() { "set" } else { "missing" },
            )),
        }
    }
}

#[derive(Debug)]
pub struct PostgrestConnection {
    client: HttpClient,
    url: Arc<Url>,
    key: Sensitive<Arc<str>>,
}

impl PostgrestConnection {
    /// Prepares a request against `rest/v1/{path}` with the credentials
    /// PostgREST expects.
    fn request(&self, method: reqwest::Method, path: &str) -> anyhow::Result<RequestBuilder> {
        let url = self.url.join("rest/v1/")?.join(path)?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &**self.key)
            .bearer_auth(&**self.key))
    }
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

/// Extracts the datastore's explanation from a failed response.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(PostgrestError { message }) = serde_json::from_str(&body) {
        return message;
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .into()
    } else {
        body
    }
}

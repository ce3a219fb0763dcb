use std::sync::Arc;

use intake_di::Build;
use intake_models::lead::LeadRecord;
use intake_persistence_contracts::submission::{SubmissionRepoError, SubmissionRepository};
use reqwest::Method;
use tracing::trace;

use crate::{error_message, PostgrestConnection};

#[derive(Debug, Clone, Build)]
pub struct PostgrestSubmissionRepository {
    config: PostgrestSubmissionRepositoryConfig,
}

#[derive(Debug, Clone)]
pub struct PostgrestSubmissionRepositoryConfig {
    pub table: Arc<str>,
}

impl PostgrestSubmissionRepository {
    pub fn new(config: PostgrestSubmissionRepositoryConfig) -> Self {
        Self { config }
    }
}

impl SubmissionRepository<PostgrestConnection> for PostgrestSubmissionRepository {
    async fn create(
        &self,
        conn: &mut PostgrestConnection,
        record: &LeadRecord,
    ) -> Result<(), SubmissionRepoError> {
        trace!(table = &*self.config.table, intent = %record.intent, "inserting submission");

        let response = conn
            .request(Method::POST, &self.config.table)?
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|err| {
                SubmissionRepoError::Datastore(format!("{:#}", anyhow::Error::from(err)))
            })?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(SubmissionRepoError::Datastore(error_message(response).await))
    }
}


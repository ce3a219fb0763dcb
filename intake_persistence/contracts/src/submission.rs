use std::future::Future;

use intake_models::lead::LeadRecord;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionRepository<Conn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Inserts a new lead. Identical records are inserted again, nothing is
    /// deduplicated.
    fn create(
        &self,
        conn: &mut Conn,
        record: &LeadRecord,
    ) -> impl Future<Output = Result<(), SubmissionRepoError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionRepoError {
    /// The datastore refused the insert. Holds the datastore's own message.
    #[error("{0}")]
    Datastore(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl<Conn: Send + Sync + 'static> MockSubmissionRepository<Conn> {
    pub fn with_create(mut self, record: LeadRecord, result: Result<(), SubmissionRepoError>) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(record))
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}

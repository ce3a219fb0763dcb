use std::future::Future;

use intake_models::lead::{LeadSubmission, LeadValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait LeadFeatureService: Send + Sync + 'static {
    /// Validate a lead form submission and store it in the datastore.
    fn submit(
        &self,
        submission: LeadSubmission,
    ) -> impl Future<Output = Result<LeadSubmitOutcome, LeadSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadSubmitOutcome {
    Stored,
    /// The honeypot was filled, so nothing has been stored.
    Absorbed,
}

#[derive(Debug, Error)]
pub enum LeadSubmitError {
    #[error(transparent)]
    Validation(#[from] LeadValidationError),
    /// The datastore refused the record. Holds the datastore's own message.
    #[error("Database error: {0}")]
    Datastore(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockLeadFeatureService {
    pub fn with_submit(
        mut self,
        submission: LeadSubmission,
        result: Result<LeadSubmitOutcome, LeadSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

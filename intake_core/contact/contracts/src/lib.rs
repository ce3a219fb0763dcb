use std::future::Future;

use intake_models::contact::{ContactSubmission, ContactValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Returns whether both the email credential and the destination address
    /// are available. Logs every missing setting.
    fn is_configured(&self) -> bool;

    /// Validate a contact form submission and forward it to the site operator
    /// by email.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    /// The message has been handed to the email provider.
    Delivered,
    /// The honeypot was filled, so the message has been dropped.
    Absorbed,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("The contact form has not been configured.")]
    NotConfigured,
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_is_configured(mut self, result: bool) -> Self {
        self.expect_is_configured().once().return_const(result);
        self
    }

    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactSubmitOutcome, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

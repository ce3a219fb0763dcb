use std::future::Future;

use intake_models::email_address::EmailAddress;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Returns `false` if no credential for the email provider is available,
    /// in which case every call to [`EmailService::send`] fails.
    fn is_configured(&self) -> bool;

    fn send(&self, email: Email) -> impl Future<Output = Result<EmailReceipt, EmailSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Sender identity, either a plain address or `Name <address>`.
    pub from: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

/// Acknowledgement of an accepted email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("No credential for the email provider has been configured.")]
    NotConfigured,
    #[error("The email provider rejected the message ({name}): {message}")]
    Rejected { name: String, message: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_is_configured(mut self, result: bool) -> Self {
        self.expect_is_configured().return_const(result);
        self
    }

    pub fn with_send(mut self, email: Email, result: Result<EmailReceipt, EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

use std::sync::Arc;

use anyhow::Context;
use intake_di::Build;
use intake_email_contracts::{ContentType, Email, EmailReceipt, EmailSendError, EmailService};
use intake_models::Sensitive;
use intake_utils::http::HttpClient;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.resend.com/";

/// Client for a Resend-compatible transactional email HTTP API.
#[derive(Debug, Clone, Build)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    /// Base url of the API; messages are posted to `{endpoint}emails`.
    pub endpoint: Arc<Url>,
    pub api_key: Option<Sensitive<Arc<str>>>,
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl EmailService for EmailServiceImpl {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(&self, email: Email) -> Result<EmailReceipt, EmailSendError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(EmailSendError::NotConfigured)?;

        let url = self
            .config
            .endpoint
            .join("emails")
            .context("Failed to build email api url")?;

        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: &email.from,
            to: [&email.recipient],
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_deref().map(String::as_str),
        };

        trace!(%url, subject = request.subject, "sending email");

        let response = self
            .client
            .post(url)
            .bearer_auth(&***api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to email api")?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SendEmailResponse>()
                .await
                .map(|SendEmailResponse { id }| EmailReceipt { id })
                .context("Failed to parse email api response")
                .map_err(Into::into);
        }

        let body = response
            .text()
            .await
            .context("Failed to read email api error response")?;

        let ApiErrorResponse { name, message } =
            serde_json::from_str(&body).unwrap_or_else(|_| ApiErrorResponse {
                name: status.as_str().into(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").into()
                } else {
                    body
                },
            });

        Err(EmailSendError::Rejected { name, message })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    name: String,
    message: String,
}

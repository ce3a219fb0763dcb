use std::sync::Arc;

use intake_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use intake_di::Build;
use intake_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use intake_models::contact::ContactSubmission;
use intake_templates_contracts::{ContactNotificationTemplate, TemplateService};
use tracing::{error, info};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Either a plain address or `Name <address>`.
    pub sender: Arc<str>,
    pub recipient: Option<Arc<str>>,
}

impl<EmailS, Template> ContactFeatureService for ContactFeatureServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    fn is_configured(&self) -> bool {
        let has_api_key = self.email.is_configured();
        if !has_api_key {
            error!("Missing RESEND_API_KEY environment variable");
        }

        let has_recipient = self.config.recipient.is_some();
        if !has_recipient {
            error!("Missing CONTACT_FORM_RECEIVER_EMAIL environment variable");
        }

        has_api_key && has_recipient
    }

    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        let Some(recipient) = self.config.recipient.as_deref() else {
            return Err(ContactSubmitError::NotConfigured);
        };

        if submission.is_honeypot_filled() {
            info!("Honeypot field filled, dropping contact message");
            return Ok(ContactSubmitOutcome::Absorbed);
        }

        let message = submission.validate()?;

        let body = self.template.render(&ContactNotificationTemplate {
            name: (*message.author.name).clone(),
            email: message.author.email.to_string(),
            message: (*message.content).clone(),
        })?;

        let email = Email {
            from: self.config.sender.to_string(),
            recipient: recipient.into(),
            subject: format!("New Contact Form Submission from {}", *message.author.name),
            body,
            content_type: ContentType::Html,
            reply_to: Some(message.author.email),
        };

        match self.email.send(email).await {
            Ok(receipt) => {
                info!(id = %receipt.id, "Contact message sent");
                Ok(ContactSubmitOutcome::Delivered)
            }
            Err(EmailSendError::NotConfigured) => Err(ContactSubmitError::NotConfigured),
            Err(err @ EmailSendError::Rejected { .. }) => {
                error!("Failed to send contact message: {err}");
                Err(ContactSubmitError::Send)
            }
            Err(EmailSendError::Other(err)) => Err(err.into()),
        }
    }
}

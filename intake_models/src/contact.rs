use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A contact form submission exactly as received, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    /// Invisible to humans, so any content marks the sender as a bot.
    pub honeypot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<ContactField>),
    #[error("Invalid email format")]
    InvalidEmail,
}

fn join_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ContactSubmission {
    pub fn is_honeypot_filled(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|x| !x.is_empty())
    }

    /// Checks that all fields are present before looking at the shape of the
    /// email address, so a submission with missing fields never reports an
    /// invalid email.
    pub fn validate(self) -> Result<ContactMessage, ContactValidationError> {
        let name = self
            .name
            .and_then(|x| ContactMessageAuthorName::try_new(x).ok());
        let email = crate::filled(self.email);
        let content = self
            .message
            .and_then(|x| ContactMessageContent::try_new(x).ok());

        match (name, email, content) {
            (Some(name), Some(email), Some(content)) => {
                let email =
                    EmailAddress::try_new(email).map_err(|_| ContactValidationError::InvalidEmail)?;
                Ok(ContactMessage {
                    author: ContactMessageAuthor { name, email },
                    content,
                })
            }
            (name, email, content) => Err(ContactValidationError::MissingFields(
                [
                    (ContactField::Name, name.is_none()),
                    (ContactField::Email, email.is_none()),
                    (ContactField::Message, content.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect(),
            )),
        }
    }
}

use std::str::FromStr;

use nutype::nutype;
use serde::Serialize;
use thiserror::Error;

use crate::filled;

/// A lead form submission exactly as received, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub intent: Option<String>,
    pub message: Option<String>,
    /// Invisible to humans, so any non-blank content marks the sender as a
    /// bot.
    pub honeypot: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadIntent {
    Subscribe,
    Contact,
    Prototype,
}

impl LeadIntent {
    pub const ALL: [Self; 3] = [Self::Subscribe, Self::Contact, Self::Prototype];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subscribe => "subscribe",
            Self::Contact => "contact",
            Self::Prototype => "prototype",
        }
    }
}

impl std::fmt::Display for LeadIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lead intent {0:?}")]
pub struct UnknownLeadIntent(pub String);

impl FromStr for LeadIntent {
    type Err = UnknownLeadIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| UnknownLeadIntent(s.into()))
    }
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct LeadEmail(String);

/// The row inserted into the datastore.
///
/// Optional fields that are absent are left out of the serialized record
/// entirely instead of being written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    pub email: LeadEmail,
    pub intent: LeadIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadValidationError {
    #[error("Missing required fields: Email and intent are mandatory.")]
    MissingFields,
    #[error("Invalid intent value.")]
    InvalidIntent(#[source] UnknownLeadIntent),
}

impl LeadSubmission {
    pub fn is_honeypot_filled(&self) -> bool {
        self.honeypot
            .as_deref()
            .is_some_and(|x| !x.trim().is_empty())
    }

    /// Validates the submission and assembles the sparse record to persist.
    ///
    /// A message is only kept for intents other than
    /// [`LeadIntent::Subscribe`]. Contact and prototype leads without a
    /// message are accepted as they are.
    pub fn into_record(self) -> Result<LeadRecord, LeadValidationError> {
        let email = self.email.and_then(|x| LeadEmail::try_new(x).ok());
        let (Some(email), Some(intent)) = (email, filled(self.intent)) else {
            return Err(LeadValidationError::MissingFields);
        };

        let intent = intent
            .parse::<LeadIntent>()
            .map_err(LeadValidationError::InvalidIntent)?;

        let message = match intent {
            LeadIntent::Subscribe => None,
            LeadIntent::Contact | LeadIntent::Prototype => filled(self.message),
        };

        Ok(LeadRecord {
            email,
            intent,
            name: filled(self.name),
            role: filled(self.role),
            message,
        })
    }
}

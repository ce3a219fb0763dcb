use intake_models::contact::ContactSubmission;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    /// Honeypot, hidden from human visitors
    pub subject: Option<String>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
            honeypot: value.subject,
        }
    }
}

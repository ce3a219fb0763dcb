use intake_models::lead::LeadSubmission;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLeadSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    /// One of `subscribe`, `contact` or `prototype`
    pub intent: Option<String>,
    pub message: Option<String>,
    /// Honeypot, hidden from human visitors
    pub hp: Option<String>,
}

impl From<ApiLeadSubmission> for LeadSubmission {
    fn from(value: ApiLeadSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            role: value.role,
            intent: value.intent,
            message: value.message,
            honeypot: value.hp,
        }
    }
}

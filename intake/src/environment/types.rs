use intake_core_contact_impl::ContactFeatureServiceImpl;
use intake_core_lead_impl::LeadFeatureServiceImpl;
use intake_email_impl::EmailServiceImpl;
use intake_persistence_postgrest::{
    submission::PostgrestSubmissionRepository, PostgrestDatabase,
};
use intake_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = intake_api_rest::RestServer<ContactFeature, LeadFeature>;

// Persistence
pub type Database = PostgrestDatabase;

// Email
pub type Email = EmailServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Repositories
pub type SubmissionRepo = PostgrestSubmissionRepository;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Email, Template>;
pub type LeadFeature = LeadFeatureServiceImpl<Database, SubmissionRepo>;

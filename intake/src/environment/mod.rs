use std::sync::Arc;

use intake_api_rest::RestServerConfig;
use intake_config::Config;
use intake_core_contact_impl::ContactFeatureConfig;
use intake_di::provider;
use intake_email_impl::EmailServiceConfig;
use intake_models::Sensitive;
use intake_persistence_postgrest::{
    submission::PostgrestSubmissionRepositoryConfig, PostgrestDatabaseConfig,
};
use intake_utils::http::HttpClient;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        http: HttpClient,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Collaborators
            EmailServiceConfig,
            PostgrestDatabaseConfig,
            PostgrestSubmissionRepositoryConfig,

            // Core
            ContactFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, http: HttpClient) -> Self {
        Self {
            _cache: Default::default(),
            http,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Collaborators
        email_service_config: EmailServiceConfig,
        postgrest_database_config: PostgrestDatabaseConfig,
        postgrest_submission_repository_config: PostgrestSubmissionRepositoryConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
        };

        // Collaborators
        let email_service_config = EmailServiceConfig {
            endpoint: config.email.endpoint.clone().into(),
            api_key: config.email.api_key.as_ref().map(secret),
        };

        let postgrest_database_config = PostgrestDatabaseConfig {
            url: config.datastore.url.clone().map(Arc::new),
            key: config.datastore.key.as_ref().map(secret),
        };

        let postgrest_submission_repository_config = PostgrestSubmissionRepositoryConfig {
            table: config.datastore.table.as_str().into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            sender: config.contact.sender.as_str().into(),
            recipient: config.contact.recipient.as_deref().map(Into::into),
        };

        Self {
            _cache: Default::default(),
            rest_server_config,
            email_service_config,
            postgrest_database_config,
            postgrest_submission_repository_config,
            contact_feature_config,
        }
    }
}

fn secret(value: &Sensitive<String>) -> Sensitive<Arc<str>> {
    Sensitive(value.as_str().into())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use intake_config::DEFAULT_CONFIG_PATH;
    use intake_di::Provides;

    use super::*;
    use crate::environment::types::RestServer;

    #[test]
    fn provide_rest_server() {
        let config = intake_config::load_with(&[DEFAULT_CONFIG_PATH], |_| None).unwrap();
        let http = HttpClient::new(Duration::from_secs(1)).unwrap();
        let mut provider = Provider::new(ConfigProvider::new(&config), http);

        let _: RestServer = provider.provide();
    }
}

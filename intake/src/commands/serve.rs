use intake_config::{settings, Config};
use intake_di::Provides;
use intake_utils::http::HttpClient;
use tracing::warn;

use crate::environment::{types::RestServer, ConfigProvider, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    warn_missing_secrets(&config);

    let http = HttpClient::new(config.http.outbound_timeout.into())?;

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, http);
    let server: RestServer = provider.provide();
    server.serve().await
}

/// Missing secrets do not prevent startup, the affected endpoints answer with
/// an error instead.
fn warn_missing_secrets(config: &Config) {
    let missing = [
        (config.email.api_key.is_none(), settings::EMAIL_API_KEY),
        (config.contact.recipient.is_none(), settings::CONTACT_RECIPIENT),
        (config.datastore.url.is_none(), settings::DATASTORE_URL),
        (config.datastore.key.is_none(), settings::DATASTORE_KEY),
    ];

    for (_, names) in missing.into_iter().filter(|&(missing, _)| missing) {
        warn!("Missing setting, provide it as {}", names.join(" or "));
    }
}

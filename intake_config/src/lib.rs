use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use intake_models::Sensitive;
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Comma separated list of config files. Later files override earlier ones.
pub const CONFIG_PATHS_ENV: &str = "INTAKE_CONFIG";

/// Environment variables accepted for each secret, in order of precedence.
pub mod settings {
    pub const EMAIL_API_KEY: &[&str] = &["RESEND_API_KEY"];
    pub const CONTACT_RECIPIENT: &[&str] = &["CONTACT_FORM_RECEIVER_EMAIL"];
    pub const DATASTORE_URL: &[&str] = &["NEXT_PUBLIC_SUPABASE_URL", "SUPABASE_URL"];
    pub const DATASTORE_KEY: &[&str] = &["NEXT_PUBLIC_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];
}

pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var(CONFIG_PATHS_ENV) {
        Ok(paths) => paths.split(',').map(PathBuf::from).collect(),
        Err(_) => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };
    load_with(&paths, |name| std::env::var(name).ok())
}

/// Loads the given config files and overlays the secrets found through
/// `lookup`, which maps an environment variable name to its value.
pub fn load_with(
    paths: &[impl AsRef<Path>],
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let mut config = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    config.apply_environment(lookup);

    Ok(config)
}

/// Returns the first non-empty value among the accepted setting `names`
/// together with the name that supplied it.
pub fn resolve_setting<'a>(
    names: &[&'a str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<(&'a str, String)> {
    names
        .iter()
        .find_map(|&name| lookup(name).filter(|x| !x.is_empty()).map(|x| (name, x)))
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub datastore: DatastoreConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub outbound_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub endpoint: Url,
    pub api_key: Option<Sensitive<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Either a plain address or `Name <address>`.
    pub sender: String,
    pub recipient: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatastoreConfig {
    pub url: Option<Url>,
    pub key: Option<Sensitive<String>>,
    pub table: String,
}

impl Config {
    fn apply_environment(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some((_, api_key)) = resolve_setting(settings::EMAIL_API_KEY, &lookup) {
            self.email.api_key = Some(api_key.into());
        }

        if let Some((_, recipient)) = resolve_setting(settings::CONTACT_RECIPIENT, &lookup) {
            self.contact.recipient = Some(recipient);
        }

        // an unusable url leaves the datastore unconfigured, so only lead
        // submissions fail
        if let Some((name, url)) = resolve_setting(settings::DATASTORE_URL, &lookup) {
            self.datastore.url = match url.parse() {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("Ignoring {name} environment variable, it is not a valid url: {err}");
                    None
                }
            };
        }

        if let Some((_, key)) = resolve_setting(settings::DATASTORE_KEY, &lookup) {
            self.datastore.key = Some(key.into());
        }

        self.email.api_key = self.email.api_key.take().filter(|x| !x.is_empty());
        self.contact.recipient = self.contact.recipient.take().filter(|x| !x.is_empty());
        self.datastore.key = self.datastore.key.take().filter(|x| !x.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    const LOCAL_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/local.toml");

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn load_default_config() {
        let config = load_with(&[DEFAULT_CONFIG_PATH], env(&[])).unwrap();

        assert_eq!(config.http.address, "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.http.outbound_timeout.0.as_secs(), 10);
        assert_eq!(config.email.endpoint.as_str(), "https://api.resend.com/");
        assert!(config.email.api_key.is_none());
        assert_eq!(config.contact.sender, "Contact Form <onboarding@resend.dev>");
        assert_eq!(config.contact.recipient, None);
        assert_eq!(config.datastore.url, None);
        assert!(config.datastore.key.is_none());
        assert_eq!(config.datastore.table, "submissions");
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let config = load_with(&[DEFAULT_CONFIG_PATH, LOCAL_CONFIG_PATH], env(&[])).unwrap();

        assert_eq!(config.http.address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.http.outbound_timeout.0.as_secs(), 10);
        assert_eq!(config.email.api_key.as_deref().map(String::as_str), Some("re_from_file"));
        assert_eq!(config.contact.recipient.as_deref(), Some("owner@example.com"));
        assert_eq!(
            config.datastore.url.as_ref().map(Url::as_str),
            Some("https://project.supabase.co/")
        );
        assert_eq!(config.datastore.key.as_deref().map(String::as_str), Some("file-key"));
    }

    #[test]
    fn environment_overrides_files() {
        let config = load_with(
            &[DEFAULT_CONFIG_PATH, LOCAL_CONFIG_PATH],
            env(&[
                ("RESEND_API_KEY", "re_from_env"),
                ("CONTACT_FORM_RECEIVER_EMAIL", "env@example.com"),
                ("SUPABASE_URL", "https://env.supabase.co/"),
                ("SUPABASE_ANON_KEY", "env-key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.email.api_key.as_deref().map(String::as_str), Some("re_from_env"));
        assert_eq!(config.contact.recipient.as_deref(), Some("env@example.com"));
        assert_eq!(
            config.datastore.url.as_ref().map(Url::as_str),
            Some("https://env.supabase.co/")
        );
        assert_eq!(config.datastore.key.as_deref().map(String::as_str), Some("env-key"));
    }

    #[test]
    fn empty_values_are_unset() {
        let config = load_with(
            &[DEFAULT_CONFIG_PATH],
            env(&[("RESEND_API_KEY", ""), ("CONTACT_FORM_RECEIVER_EMAIL", "")]),
        )
        .unwrap();

        assert!(config.email.api_key.is_none());
        assert_eq!(config.contact.recipient, None);
    }

    #[test]
    fn invalid_datastore_url() {
        let config = load_with(
            &[DEFAULT_CONFIG_PATH, LOCAL_CONFIG_PATH],
            env(&[
                ("NEXT_PUBLIC_SUPABASE_URL", "not a url"),
                ("CONTACT_FORM_RECEIVER_EMAIL", "env@example.com"),
            ]),
        )
        .unwrap();

        assert_eq!(config.datastore.url, None);
        assert_eq!(config.datastore.key.as_deref().map(String::as_str), Some("file-key"));
        assert_eq!(config.contact.recipient.as_deref(), Some("env@example.com"));
    }

    #[test]
    fn missing_config_file() {
        let err = load_with(&["/does/not/exist.toml"], env(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to read config file at /does/not/exist.toml"
        );
    }

    #[test]
    fn resolve_first_non_empty() {
        let names = settings::DATASTORE_URL;

        assert_eq!(resolve_setting(names, env(&[])), None);
        assert_eq!(
            resolve_setting(names, env(&[("SUPABASE_URL", "b")])),
            Some(("SUPABASE_URL", "b".into()))
        );
        assert_eq!(
            resolve_setting(
                names,
                env(&[("NEXT_PUBLIC_SUPABASE_URL", "a"), ("SUPABASE_URL", "b")])
            ),
            Some(("NEXT_PUBLIC_SUPABASE_URL", "a".into()))
        );
        assert_eq!(
            resolve_setting(
                names,
                env(&[("NEXT_PUBLIC_SUPABASE_URL", ""), ("SUPABASE_URL", "b")])
            ),
            Some(("SUPABASE_URL", "b".into()))
        );
    }
}

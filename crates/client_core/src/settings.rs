//! Client configuration: which backend the data access layer talks to.

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::error::ClientConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/products";
const DEFAULT_CONFIG_FILE: &str = "catalog";
const ENV_PREFIX: &str = "CATALOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Mock,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_mock")]
    pub mock: bool,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_mock() -> bool {
    true
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mock: default_mock(),
            api_url: default_api_url(),
        }
    }
}

impl ClientConfig {
    /// Reads `catalog.toml` (optional) and `CATALOG__*` environment variables.
    pub fn load() -> Result<Self, ClientConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(file: &str) -> Result<Self, ClientConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: ClientConfig = settings.try_deserialize()?;
        config.parsed_api_url()?;
        Ok(config)
    }

    pub fn backend(&self) -> BackendMode {
        if self.mock {
            BackendMode::Mock
        } else {
            BackendMode::Remote
        }
    }

    pub fn parsed_api_url(&self) -> Result<Url, ClientConfigError> {
        Url::parse(&self.api_url).map_err(|source| ClientConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            source,
        })
    }
}

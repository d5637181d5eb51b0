//! Configuration model loaded from external sources.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[cfg(feature = "client")]
    #[error("Error loading settings: {0}")]
    Load(#[from] config::ConfigError),
}

fn default_api_url() -> String {
    "https://api.apper.io/v1".to_string()
}

fn default_page_size() -> usize {
    crate::pagination::DEFAULT_ITEMS_PER_PAGE
}

fn default_recent_activity_limit() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Connection and display settings of the CRM client.
pub struct AppConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            public_key: String::new(),
            api_url: default_api_url(),
            page_size: default_page_size(),
            recent_activity_limit: default_recent_activity_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Checks the settings the client cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential("project_id"));
        }
        if self.public_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("public_key"));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidSetting {
                name: "api_url",
                reason: format!("'{}' is not an http(s) URL", self.api_url),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "page_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml`
    /// overrides and `APP_*` environment variables, in that order.
    #[cfg(feature = "client")]
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        let env_file = config::File::with_name(&format!("config/{app_env}"));
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(env_file.required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        let app_config = settings.try_deserialize::<AppConfig>()?;
        app_config.validate()?;
        Ok(app_config)
    }
}

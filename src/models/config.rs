//! Configuration model loaded from external sources.

use std::env;
use std::num::NonZeroU32;
use std::path::Path;

use config::Config;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::MemberId;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_ITEMS_PER_PAGE.get()
}

fn default_user_id() -> i64 {
    1
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the notice listing client.
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Fixed identity sent as `userId` on detail and write calls.
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            user_id: default_user_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads `config/default`, the `APP_ENV` profile (defaults to `local`) and
    /// `APP_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(Path::new("config"), &app_env)
    }

    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let default_file = dir.join("default");
        let profile_file = dir.join(profile);

        let settings = Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&profile_file.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        let config = settings.try_deserialize::<ClientConfig>()?;
        config.page_size()?;
        config.user_id()?;
        Ok(config)
    }

    pub fn page_size(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.page_size).ok_or(ConfigError::Invalid {
            key: "page_size",
            reason: "must be greater than zero".to_string(),
        })
    }

    pub fn user_id(&self) -> Result<MemberId, ConfigError> {
        MemberId::new(self.user_id).map_err(|err| ConfigError::Invalid {
            key: "user_id",
            reason: err.to_string(),
        })
    }
}

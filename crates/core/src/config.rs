//! Frontend configuration

use serde::{Deserialize, Serialize};

/// Authentication constants
pub struct AuthConfig;

impl AuthConfig {
    /// Storage key holding the bearer token
    pub const ACCESS_TOKEN_KEY: &'static str = "access_token";

    /// Storage key holding the serialized user profile
    pub const USER_INFO_KEY: &'static str = "user_info";

    /// Where users are sent when they need to (re-)authenticate
    pub const LOGIN_PATH: &'static str = "/auth";
}

/// Names of the session entries in persistent storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    #[serde(default = "default_access_token_key")]
    pub access_token: String,
    #[serde(default = "default_user_info_key")]
    pub user_info: String,
}

fn default_access_token_key() -> String {
    AuthConfig::ACCESS_TOKEN_KEY.to_string()
}

fn default_user_info_key() -> String {
    AuthConfig::USER_INFO_KEY.to_string()
}

fn default_login_path() -> String {
    AuthConfig::LOGIN_PATH.to_string()
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            access_token: default_access_token_key(),
            user_info: default_user_info_key(),
        }
    }
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin. The browser falls back to `window.location.origin` when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds (ignored on wasm32)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Hard redirect target after the session is lost
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default)]
    pub storage: StorageKeys,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
            user_agent: None,
            login_path: default_login_path(),
            storage: StorageKeys::default(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClientConfig {
    /// Load configuration from an optional TOML file, overridden by
    /// `TIMELINE_`-prefixed environment variables with `__` between nested
    /// keys (`TIMELINE_LOGIN_PATH`, `TIMELINE_STORAGE__ACCESS_TOKEN`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the merged settings do not deserialize
    pub fn load(path: Option<&std::path::Path>) -> crate::CoreResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`load`](Self::load), reading variables from `env` instead of
    /// the process environment when given
    fn load_with_env(
        path: Option<&std::path::Path>,
        env: Option<config::Map<String, String>>,
    ) -> crate::CoreResult<Self> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TIMELINE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ClientConfig {
    /// Reject settings the client could never work with
    ///
    /// # Errors
    ///
    /// Returns an error when the login path is not absolute or a storage key is empty
    pub fn validate(&self) -> crate::CoreResult<()> {
        if !self.login_path.starts_with('/') {
            return Err(crate::CoreError::invalid_config(format!(
                "login_path must be an absolute path, got '{}'",
                self.login_path
            )));
        }
        if self.storage.access_token.is_empty() || self.storage.user_info.is_empty() {
            return Err(crate::CoreError::invalid_config(
                "storage keys must not be empty",
            ));
        }
        Ok(())
    }
}

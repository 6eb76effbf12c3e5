//! Process configuration.
//!
//! Configuration is read from a YAML file (by default `config.yaml` in the
//! platform config directory for `zdbot`) and then overlaid with `ZENDESK_*`
//! environment variables. It carries:
//! - The Zendesk tenant subdomain and the credential pair used to reach it
//! - The display limit applied to list and search replies
//! - The timeout for backend requests

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ZdError};

/// How the gateway authenticates against Zendesk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Password,
    Token,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Password => write!(f, "password"),
            AuthType::Token => write!(f, "token"),
        }
    }
}

impl std::str::FromStr for AuthType {
    type Err = ZdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "password" => Ok(AuthType::Password),
            "token" => Ok(AuthType::Token),
            _ => Err(ZdError::Config(format!(
                "unknown auth_type '{}', expected 'password' or 'token'",
                s
            ))),
        }
    }
}

/// Main configuration structure
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tenant subdomain, as in `<subdomain>.zendesk.com`
    #[serde(default)]
    pub subdomain: String,

    /// Agent user name (an email address for Zendesk)
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub auth_type: AuthType,

    /// API token, used when `auth_type` is `token`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,

    /// Account password, used when `auth_type` is `password`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Maximum number of ticket lines per list or search reply (default: 10)
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Backend request timeout in seconds (default: 30, 0 = no timeout)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Overrides the `https://<subdomain>.zendesk.com` base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_display_limit() -> usize {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subdomain: String::new(),
            user: String::new(),
            auth_type: AuthType::default(),
            token: String::new(),
            password: String::new(),
            display_limit: default_display_limit(),
            timeout: default_timeout(),
            base_url: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("subdomain", &self.subdomain)
            .field("user", &self.user)
            .field("auth_type", &self.auth_type)
            .field("token", &redacted(&self.token))
            .field("password", &redacted(&self.password))
            .field("display_limit", &self.display_limit)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "[REDACTED]" }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "zdbot", "zdbot")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("zdbot.yaml"))
    }

    /// Load configuration from `path` (or the default location), apply
    /// environment overrides, and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`] but without validation, for displaying
    /// incomplete configurations.
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                ZdError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read config at {}: {}", path.display(), e),
                ))
            })?;
            serde_yaml_ng::from_str(&content)?
        } else {
            tracing::debug!("no config file at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Overlay non-empty `ZENDESK_*` environment variables onto this config
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(subdomain) = non_empty_env("ZENDESK_SUBDOMAIN") {
            self.subdomain = subdomain;
        }
        if let Some(user) = non_empty_env("ZENDESK_USER") {
            self.user = user;
        }
        if let Some(token) = non_empty_env("ZENDESK_TOKEN") {
            self.token = token;
        }
        if let Some(password) = non_empty_env("ZENDESK_PASSWORD") {
            self.password = password;
        }
        if let Some(auth_type) = non_empty_env("ZENDESK_AUTH_TYPE") {
            self.auth_type = auth_type.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.subdomain.trim().is_empty() {
            return Err(ZdError::Config(
                "subdomain not configured. Set ZENDESK_SUBDOMAIN or add 'subdomain' to the config file"
                    .to_string(),
            ));
        }
        if self.user.trim().is_empty() {
            return Err(ZdError::Config(
                "user not configured. Set ZENDESK_USER or add 'user' to the config file"
                    .to_string(),
            ));
        }
        if self.display_limit == 0 {
            return Err(ZdError::Config(
                "display_limit must be a positive integer".to_string(),
            ));
        }
        let missing = match self.auth_type {
            AuthType::Token => self.token.is_empty().then_some("token"),
            AuthType::Password => self.password.is_empty().then_some("password"),
        };
        if let Some(field) = missing {
            return Err(ZdError::Config(format!(
                "auth_type is '{}' but no {} is configured",
                self.auth_type, field
            )));
        }
        self.base_url()?;
        Ok(())
    }

    /// Base URL of the tenant, e.g. `https://acme.zendesk.com`
    pub fn base_url(&self) -> Result<Url> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.zendesk.com", self.subdomain.trim()),
        };
        Ok(Url::parse(&raw)?)
    }

    /// Base URL rendered without a trailing slash
    pub fn base_url_string(&self) -> Result<String> {
        Ok(self.base_url()?.as_str().trim_end_matches('/').to_string())
    }

    /// Basic-auth user name and secret for the configured auth type.
    ///
    /// Token auth uses the `<user>/token` convention.
    pub fn credentials(&self) -> (String, SecretString) {
        match self.auth_type {
            AuthType::Token => (
                format!("{}/token", self.user),
                SecretString::from(self.token.clone()),
            ),
            AuthType::Password => (self.user.clone(), SecretString::from(self.password.clone())),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

//! Configuration
//!
//! Loaded from an optional `stanza.yaml` next to the working directory.
//! The API key never lives in the file; the config names an environment
//! variable and the key is read from there at client construction time.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::channel::DisplayConfig;
use crate::error::StanzaError;

/// Default config file name looked up in the working directory
pub const CONFIG_FILE: &str = "stanza.yaml";

/// Whether submitted prompts keep their markers or are resolved first.
///
/// Stored prompts normally keep markers intact so resolution can happen
/// at generation time; `Resolved` bakes current tag values in at save
/// time instead. A caller decision, not a property of the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    #[default]
    Raw,
    Resolved,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (http or https)
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "ApiConfig::default_key_env")]
    pub key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            key_env: Self::default_key_env(),
        }
    }
}

impl ApiConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:54321".to_string()
    }

    fn default_key_env() -> String {
        "STANZA_API_KEY".to_string()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StanzaConfig {
    /// Service backend: "rest" or "mock"
    #[serde(default = "StanzaConfig::default_backend")]
    pub backend: String,
    #[serde(default)]
    pub submission: SubmissionMode,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for StanzaConfig {
    fn default() -> Self {
        Self {
            backend: Self::default_backend(),
            submission: SubmissionMode::default(),
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl StanzaConfig {
    fn default_backend() -> String {
        "rest".to_string()
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `stanza.yaml` in the
    /// working directory is used if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, StanzaError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let fallback = Path::new(CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, StanzaError> {
        let yaml = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&yaml)?;
        config.validated_base_url()?;
        Ok(config)
    }

    /// Parse and validate the base URL. Only http/https are accepted,
    /// which keeps redirects to odd schemes out of the client.
    pub fn validated_base_url(&self) -> Result<Url, StanzaError> {
        let parsed = Url::parse(&self.api.base_url).map_err(|_| StanzaError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            _ => Err(StanzaError::InvalidBaseUrl { url: self.api.base_url.clone() }),
        }
    }

    /// Base URL as a string without a trailing slash, for endpoint joins
    pub fn base_url_trimmed(&self) -> Result<String, StanzaError> {
        let url = self.validated_base_url()?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, StanzaError> {
        std::env::var(&self.api.key_env)
            .map_err(|_| StanzaError::MissingApiKey { env: self.api.key_env.clone() })
    }
}

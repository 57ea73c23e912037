//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
/// Buffer edits and marker resolution are total and never produce these;
/// errors come from configuration, validation and the backend boundary.
#[derive(Error, Debug)]
pub enum StanzaError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("API key not set: {env}")]
    MissingApiKey { env: String },

    #[error("Invalid tag label: '{label}'")]
    InvalidLabel { label: String },

    #[error("Invalid tag spec: '{spec}' (expected label=value)")]
    InvalidTagSpec { spec: String },

    #[error("Unknown channel kind: '{kind}'")]
    UnknownChannelKind { kind: String },

    #[error("Unknown backend: '{name}'")]
    UnknownBackend { name: String },

    #[error("Invalid storage target: {detail}")]
    InvalidStorageTarget { detail: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Backend rejected the request: {detail}")]
    Rejected { detail: String },

    #[error("Backend returned an empty response")]
    EmptyResponse,

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for StanzaError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            StanzaError::Config(_) => Some("Check stanza.yaml syntax: indentation and quoting"),
            StanzaError::InvalidBaseUrl { .. } => {
                Some("Use an absolute http:// or https:// URL for api.base_url")
            }
            StanzaError::MissingApiKey { .. } => {
                Some("Export the key named by api.key_env (default STANZA_API_KEY)")
            }
            StanzaError::InvalidLabel { .. } => {
                Some("Labels start with a letter and contain only letters, digits, '-' or '_'")
            }
            StanzaError::InvalidTagSpec { .. } => Some("Pass tags as --tag label=value"),
            StanzaError::UnknownChannelKind { .. } => {
                Some("Valid kinds: blog, newsletter, social, video")
            }
            StanzaError::UnknownBackend { .. } => Some("Valid backends: rest, mock"),
            StanzaError::InvalidStorageTarget { .. } => {
                Some("Bucket and path must be non-empty relative names without '..'")
            }
            StanzaError::Http(_) => Some("Check the backend is reachable and api.base_url is correct"),
            StanzaError::Api { .. } => Some("Inspect the backend logs for the failing endpoint"),
            StanzaError::Rejected { .. } => Some("Fix the request payload and retry"),
            StanzaError::EmptyResponse => {
                Some("The backend answered without data; retry or check its logs")
            }
            StanzaError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            StanzaError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

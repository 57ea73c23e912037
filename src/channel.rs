//! Channel model and display attributes
//!
//! A channel is a content-distribution destination: it has a kind, a
//! public URL, the prompt used to drive generation, and the most recent
//! content body. Display attributes (badge colors, icons) come from an
//! explicit [`DisplayConfig`] mapping over closed enums instead of
//! ambient string-keyed lookups.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StanzaError;

/// A content-distribution destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub kind: ChannelKind,
    #[serde(default)]
    pub url: String,
    /// The stored prompt template, markers intact
    #[serde(default)]
    pub prompt: String,
    /// Most recent content body for this channel
    #[serde(default)]
    pub content: String,
}

impl Channel {
    /// Load a channel row from a YAML file
    pub fn from_yaml(yaml: &str) -> Result<Self, StanzaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Closed set of channel kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Blog,
    Newsletter,
    Social,
    Video,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Blog => "blog",
            ChannelKind::Newsletter => "newsletter",
            ChannelKind::Social => "social",
            ChannelKind::Video => "video",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = StanzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blog" => Ok(ChannelKind::Blog),
            "newsletter" => Ok(ChannelKind::Newsletter),
            "social" => Ok(ChannelKind::Social),
            "video" => Ok(ChannelKind::Video),
            other => Err(StanzaError::UnknownChannelKind { kind: other.to_string() }),
        }
    }
}

/// Publication status of a piece of channel content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    Draft,
    Archived,
}

/// Badge accent used when rendering statuses and kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Success,
    Info,
    Warning,
    Error,
    Default,
}

/// Explicit display mapping, injected as configuration.
///
/// Defaults cover the full closed sets; a config file may override
/// individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_statuses")]
    pub statuses: HashMap<PublishStatus, BadgeColor>,
    #[serde(default = "DisplayConfig::default_icons")]
    pub icons: HashMap<ChannelKind, String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            statuses: Self::default_statuses(),
            icons: Self::default_icons(),
        }
    }
}

impl DisplayConfig {
    fn default_statuses() -> HashMap<PublishStatus, BadgeColor> {
        HashMap::from([
            (PublishStatus::Published, BadgeColor::Success),
            (PublishStatus::Draft, BadgeColor::Info),
            (PublishStatus::Archived, BadgeColor::Default),
        ])
    }

    fn default_icons() -> HashMap<ChannelKind, String> {
        HashMap::from([
            (ChannelKind::Blog, "mdi:post-outline".to_string()),
            (ChannelKind::Newsletter, "mdi:email-newsletter".to_string()),
            (ChannelKind::Social, "mdi:share-variant".to_string()),
            (ChannelKind::Video, "mdi:video-outline".to_string()),
        ])
    }

    pub fn badge(&self, status: PublishStatus) -> BadgeColor {
        self.statuses.get(&status).copied().unwrap_or(BadgeColor::Default)
    }

    pub fn icon(&self, kind: ChannelKind) -> &str {
        self.icons.get(&kind).map(String::as_str).unwrap_or("mdi:web")
    }
}

//! # Backend service clients
//!
//! Typed async clients for the three remote collaborators:
//!
//! - [`ChannelApi`] - channel metadata updates (prompt persistence)
//! - [`ContentApi`] - content generation (initial and full passes)
//! - [`StorageApi`] - raw blob upload to a bucket/path
//!
//! The editor session only depends on the [`ChannelService`] trait, so
//! tests swap in [`MockChannelService`] without touching the network.
//! Every request body is a precisely typed struct validated before the
//! call goes out; the backend itself is treated as opaque.

mod channel;
mod content;
mod mock;
mod storage;

pub use channel::ChannelApi;
pub use content::{ContentApi, GeneratedContent, GenerateRequest};
pub use mock::MockChannelService;
pub use storage::{StorageApi, StoredObject, UploadRequest};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::StanzaConfig;
use crate::error::StanzaError;

// ============================================================================
// CHANNEL SERVICE TRAIT
// ============================================================================

/// Persists channel metadata changes.
///
/// One method because submission is the only mutation the editor makes.
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait ChannelService: Send + Sync {
    /// Implementation name (e.g. "rest", "mock")
    fn name(&self) -> &str;

    /// Replace the channel's metadata, returning the stored record
    async fn modify_channel(
        &self,
        channel_id: &str,
        update: ChannelUpdate,
    ) -> Result<ChannelRecord, StanzaError>;
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

/// Payload for a channel update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUpdate {
    pub name: String,
    pub channel_type: String,
    /// The prompt text being persisted (markers intact in raw mode)
    pub brand_voice_initial: String,
}

/// Stored channel record as echoed by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand_voice_initial: Option<String>,
}

/// Standard `{ data, error }` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Error payload inside an envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// An error payload, or a missing `data`, is a failure
    pub fn into_result(self) -> Result<T, StanzaError> {
        if let Some(err) = self.error {
            let detail = match (err.code, err.message) {
                (Some(code), Some(msg)) => format!("{code}: {msg}"),
                (None, Some(msg)) => msg,
                (Some(code), None) => code,
                (None, None) => "unspecified error".to_string(),
            };
            return Err(StanzaError::Rejected { detail });
        }
        self.data.ok_or(StanzaError::EmptyResponse)
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Create a channel service by backend name
///
/// | Name | Description | Requires |
/// |------|-------------|----------|
/// | `rest` | Backend REST API | base URL + API key env var |
/// | `mock` | Testing | Nothing |
pub fn create_channel_service(
    config: &StanzaConfig,
) -> Result<Arc<dyn ChannelService>, StanzaError> {
    match config.backend.to_lowercase().as_str() {
        "rest" => Ok(Arc::new(ChannelApi::from_config(config)?)),
        "mock" => Ok(Arc::new(MockChannelService::new())),
        other => Err(StanzaError::UnknownBackend { name: other.to_string() }),
    }
}

// ============================================================================
// TESTS
// ============================================================================

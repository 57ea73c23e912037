//! Channel update client
//!
//! Persists prompt edits through the backend's channel endpoint.
//! Requires the API key named by the config's `key_env`.

use async_trait::async_trait;

use super::{ApiEnvelope, ChannelRecord, ChannelService, ChannelUpdate};
use crate::config::StanzaConfig;
use crate::error::StanzaError;

/// REST client for channel metadata updates
pub struct ChannelApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChannelApi {
    /// Build from config: validated base URL plus the key from the
    /// configured environment variable.
    pub fn from_config(config: &StanzaConfig) -> Result<Self, StanzaError> {
        Ok(Self::with_parts(config.base_url_trimmed()?, config.api_key()?))
    }

    /// Build from explicit parts (tests, custom wiring)
    pub fn with_parts(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, channel_id: &str) -> String {
        format!("{}/functions/v1/api/channel/{}", self.base_url, channel_id)
    }
}

#[async_trait]
impl ChannelService for ChannelApi {
    fn name(&self) -> &str {
        "rest"
    }

    async fn modify_channel(
        &self,
        channel_id: &str,
        update: ChannelUpdate,
    ) -> Result<ChannelRecord, StanzaError> {
        let url = self.endpoint(channel_id);

        tracing::debug!(
            service = "channel",
            channel_id,
            prompt_len = update.brand_voice_initial.len(),
            "Sending channel update"
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&update)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(service = "channel", status, detail = %detail, "Channel update failed");
            return Err(StanzaError::Api { status, detail });
        }

        let envelope: ApiEnvelope<ChannelRecord> = response.json().await?;
        let record = envelope.into_result()?;

        tracing::debug!(
            service = "channel",
            channel_id,
            stored_id = record.id.as_deref().unwrap_or("(none)"),
            "Channel update stored"
        );

        Ok(record)
    }
}

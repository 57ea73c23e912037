//! Content generation client
//!
//! Two request shapes keyed by channel id: `initial` for a first draft
//! and `generate-full` for the fuller pass including SEO fields. Both
//! take the same request body; the backend decides what to fill in.

use serde::{Deserialize, Serialize};

use crate::config::StanzaConfig;
use crate::error::StanzaError;

const STAGE_INITIAL: &str = "initial";
const STAGE_FULL: &str = "generate-full";

/// REST client for content generation
pub struct ContentApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ContentApi {
    pub fn from_config(config: &StanzaConfig) -> Result<Self, StanzaError> {
        Ok(Self::with_parts(config.base_url_trimmed()?, config.api_key()?))
    }

    pub fn with_parts(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, channel_id: &str, stage: &str) -> String {
        format!(
            "{}/functions/v1/api/generate-content/{}/{}",
            self.base_url, channel_id, stage
        )
    }

    /// First-draft generation
    pub async fn generate_initial(
        &self,
        channel_id: &str,
        request: GenerateRequest,
    ) -> Result<GeneratedContent, StanzaError> {
        self.send(channel_id, STAGE_INITIAL, request).await
    }

    /// Full generation including SEO fields
    pub async fn generate_full(
        &self,
        channel_id: &str,
        request: GenerateRequest,
    ) -> Result<GeneratedContent, StanzaError> {
        self.send(channel_id, STAGE_FULL, request).await
    }

    async fn send(
        &self,
        channel_id: &str,
        stage: &str,
        request: GenerateRequest,
    ) -> Result<GeneratedContent, StanzaError> {
        let url = self.endpoint(channel_id, stage);

        tracing::debug!(
            service = "content",
            channel_id,
            stage,
            has_idea = request.idea.is_some(),
            has_feedback = request.feedback.is_some(),
            "Requesting content generation"
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(service = "content", status, stage, detail = %detail, "Generation failed");
            return Err(StanzaError::Api { status, detail });
        }

        let content: GeneratedContent = response.json().await?;

        tracing::debug!(
            service = "content",
            channel_id,
            stage,
            content_len = content.content.as_deref().map(str::len).unwrap_or(0),
            "Generation response received"
        );

        Ok(content)
    }
}

// ============================================================================
// API TYPES
// ============================================================================

/// Inputs for a generation request. All optional; the backend works with
/// whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Structured generation result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub seo_meta_description: Option<String>,
    #[serde(default)]
    pub seo_slug: Option<String>,
    #[serde(default)]
    pub seo_title_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_for_both_stages() {
        let api = ContentApi::with_parts("https://api.example.com", "key");
        assert_eq!(
            api.endpoint("ch-1", STAGE_INITIAL),
            "https://api.example.com/functions/v1/api/generate-content/ch-1/initial"
        );
        assert_eq!(
            api.endpoint("ch-1", STAGE_FULL),
            "https://api.example.com/functions/v1/api/generate-content/ch-1/generate-full"
        );
    }

    #[test]
    fn request_omits_absent_fields() {
        let request = GenerateRequest { idea: Some("launch recap".into()), ..Default::default() };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["idea"], "launch recap");
        assert!(json.get("feedback").is_none());
        assert!(json.get("content").is_none());
    }

    #[test]
    fn response_parses_partial_fields() {
        let content: GeneratedContent = serde_json::from_value(serde_json::json!({
            "title": "Launch recap",
            "seo_slug": "launch-recap"
        }))
        .unwrap();

        assert_eq!(content.title.as_deref(), Some("Launch recap"));
        assert_eq!(content.seo_slug.as_deref(), Some("launch-recap"));
        assert_eq!(content.content, None);
    }
}

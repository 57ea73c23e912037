//! Mock channel service for testing
//!
//! Returns configurable outcomes without making real API calls, records
//! every request for assertions, and can hold each call open for a
//! configurable delay so in-flight behavior is testable.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ChannelRecord, ChannelService, ChannelUpdate};
use crate::error::StanzaError;

/// Queued result for one `modify_channel` call
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Accept(ChannelRecord),
    Reject(String),
}

/// Mock implementation of [`ChannelService`]
pub struct MockChannelService {
    /// Queue of outcomes to serve (FIFO); empty queue echoes the update
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    /// Hold each call open this long before settling
    delay: Option<Duration>,
    /// Every request made, in order
    requests: Arc<Mutex<Vec<(String, ChannelUpdate)>>>,
}

impl MockChannelService {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hold each call open for `delay` before settling
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful outcome
    pub fn queue_success(&self, record: ChannelRecord) {
        self.outcomes.lock().push(MockOutcome::Accept(record));
    }

    /// Queue a failing outcome
    pub fn queue_failure(&self, detail: impl Into<String>) {
        self.outcomes.lock().push(MockOutcome::Reject(detail.into()));
    }

    /// All requests made so far
    pub fn requests(&self) -> Vec<(String, ChannelUpdate)> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<(String, ChannelUpdate)> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockChannelService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelService for MockChannelService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn modify_channel(
        &self,
        channel_id: &str,
        update: ChannelUpdate,
    ) -> Result<ChannelRecord, StanzaError> {
        // Record at call entry so invocation counts include in-flight calls
        self.requests
            .lock()
            .push((channel_id.to_string(), update.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = {
            let mut queue = self.outcomes.lock();
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        };

        match outcome {
            Some(MockOutcome::Accept(record)) => Ok(record),
            Some(MockOutcome::Reject(detail)) => Err(StanzaError::Rejected { detail }),
            // Default: echo the update back as the stored record
            None => Ok(ChannelRecord {
                id: Some(channel_id.to_string()),
                name: Some(update.name),
                brand_voice_initial: Some(update.brand_voice_initial),
            }),
        }
    }
}

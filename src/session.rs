//! Editing session
//!
//! An [`EditorSession`] owns one channel's prompt while it is being
//! edited: the buffer and cursor, the tag set supplied at open time, the
//! submission mode, and a handle to the channel service. Sessions are
//! independent; two rows being edited never share state.
//!
//! Submission is guarded: while one save is in flight further submits
//! are rejected, so a burst of clicks produces exactly one backend call.
//! Failures surface as a notice and never escape the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::channel::Channel;
use crate::config::SubmissionMode;
use crate::editor::{PromptBuffer, Selection};
use crate::notify::{NoticeLog, Severity};
use crate::service::{ChannelService, ChannelUpdate};
use crate::tags::{Tag, TagSet};
use crate::template::resolve_markers;

/// How a submit attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend stored the prompt
    Saved,
    /// The backend call settled with an error; a notice was emitted
    Failed,
    /// A prior submission is still in flight; nothing was sent
    Busy,
}

/// One channel's open prompt editor
pub struct EditorSession {
    channel_id: String,
    channel_name: String,
    channel_type: String,
    buffer: RwLock<PromptBuffer>,
    tags: TagSet,
    mode: SubmissionMode,
    service: Arc<dyn ChannelService>,
    notices: NoticeLog,
    busy: AtomicBool,
}

impl EditorSession {
    /// Open an editor over the channel's persisted prompt.
    ///
    /// `tags` is the read-only substitution set for this session,
    /// derived from the row being edited (see [`crate::tags::standard_tags`]).
    pub fn open(
        channel: &Channel,
        tags: TagSet,
        mode: SubmissionMode,
        service: Arc<dyn ChannelService>,
        notices: NoticeLog,
    ) -> Self {
        Self {
            channel_id: channel.id.clone(),
            channel_name: channel.name.clone(),
            channel_type: channel.kind.as_str().to_string(),
            buffer: RwLock::new(PromptBuffer::from_text(channel.prompt.clone())),
            tags,
            mode,
            service,
            notices,
            busy: AtomicBool::new(false),
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    /// Current buffer text (markers intact)
    pub fn text(&self) -> String {
        self.buffer.read().text().to_string()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.buffer.read().selection()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.buffer.write().set_text(text);
    }

    pub fn set_selection(&self, selection: Selection) {
        self.buffer.write().set_selection(selection);
    }

    /// Splice a tag marker at the cursor. No-op (returns false) when the
    /// field has no selection yet.
    pub fn insert_tag(&self, tag: &Tag) -> bool {
        self.buffer.write().insert_tag(tag)
    }

    /// The buffer with all known markers substituted, for preview
    pub fn preview(&self) -> String {
        resolve_markers(&self.text(), &self.tags)
    }

    /// Whether a submission is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// The payload a submit would send under the session's mode
    pub fn payload(&self) -> ChannelUpdate {
        let text = self.text();
        let brand_voice_initial = match self.mode {
            SubmissionMode::Raw => text,
            SubmissionMode::Resolved => resolve_markers(&text, &self.tags),
        };
        ChannelUpdate {
            name: self.channel_name.clone(),
            channel_type: self.channel_type.clone(),
            brand_voice_initial,
        }
    }

    /// Persist the prompt through the channel service.
    ///
    /// Re-entrant submits while a call is in flight return
    /// [`SubmitOutcome::Busy`] without touching the backend. The buffer
    /// is left as-is on failure so the user can retry.
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(channel_id = %self.channel_id, "Submit ignored: already in flight");
            return SubmitOutcome::Busy;
        }

        let update = self.payload();
        let result = self.service.modify_channel(&self.channel_id, update).await;
        self.busy.store(false, Ordering::SeqCst);

        match result {
            Ok(_) => {
                self.notices.push(
                    Severity::Success,
                    format!("Prompt saved for {}", self.channel_name),
                );
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::error!(channel_id = %self.channel_id, error = %e, "Prompt save failed");
                self.notices.push(
                    Severity::Error,
                    format!("Could not save prompt for {}: {}", self.channel_name, e),
                );
                SubmitOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("channel_id", &self.channel_id)
            .field("mode", &self.mode)
            .field("busy", &self.is_busy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelKind;
    use crate::service::MockChannelService;
    use crate::tags::standard_tags;

    fn channel() -> Channel {
        Channel {
            id: "ch-7".into(),
            name: "Engineering Blog".into(),
            kind: ChannelKind::Blog,
            url: "https://blog.example.com".into(),
            prompt: "Write about {{content}}".into(),
            content: "the new editor".into(),
        }
    }

    fn session(mode: SubmissionMode) -> (EditorSession, Arc<MockChannelService>) {
        let ch = channel();
        let mock = Arc::new(MockChannelService::new());
        let session = EditorSession::open(
            &ch,
            standard_tags(&ch),
            mode,
            mock.clone(),
            NoticeLog::new(),
        );
        (session, mock)
    }

    #[test]
    fn opens_with_persisted_prompt_and_no_selection() {
        let (session, _) = session(SubmissionMode::Raw);
        assert_eq!(session.text(), "Write about {{content}}");
        assert_eq!(session.selection(), None);
        assert!(!session.is_busy());
    }

    #[test]
    fn insert_tag_requires_focus() {
        let (session, _) = session(SubmissionMode::Raw);

        let date = Tag::new("date", "").unwrap();
        assert!(!session.insert_tag(&date));

        session.set_selection(Selection::caret(0));
        assert!(session.insert_tag(&date));
        assert!(session.text().starts_with("{{date}}"));
    }

    #[test]
    fn preview_resolves_known_markers() {
        let (session, _) = session(SubmissionMode::Raw);
        assert_eq!(session.preview(), "Write about the new editor");
    }

    #[test]
    fn raw_payload_keeps_markers() {
        let (session, _) = session(SubmissionMode::Raw);
        let payload = session.payload();
        assert_eq!(payload.brand_voice_initial, "Write about {{content}}");
        assert_eq!(payload.name, "Engineering Blog");
        assert_eq!(payload.channel_type, "blog");
    }

    #[test]
    fn resolved_payload_substitutes_markers() {
        let (session, _) = session(SubmissionMode::Resolved);
        let payload = session.payload();
        assert_eq!(payload.brand_voice_initial, "Write about the new editor");
    }

    #[tokio::test]
    async fn submit_sends_one_call_and_notices_success() {
        let (session, mock) = session(SubmissionMode::Raw);

        let outcome = session.submit().await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(mock.request_count(), 1);
        assert!(!session.is_busy());
    }
}

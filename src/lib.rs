//! Stanza - channel prompt editor core and content service clients

pub mod channel;
pub mod config;
pub mod editor;
pub mod error;
pub mod notify;
pub mod service;
pub mod session;
pub mod tags;
pub mod template;

pub use channel::{BadgeColor, Channel, ChannelKind, DisplayConfig, PublishStatus};
pub use config::{StanzaConfig, SubmissionMode};
pub use editor::{PromptBuffer, Selection};
pub use error::{FixSuggestion, StanzaError};
pub use notify::{Notice, NoticeLog, Severity};
pub use session::{EditorSession, SubmitOutcome};
pub use tags::{standard_tags, Tag, TagSet};
pub use template::{resolve_markers, MarkerResolver};

//! # Editor session tests
//!
//! End-to-end behavior of an editing session against the mock channel
//! service:
//! - submission sends exactly one typed update
//! - the busy guard rejects re-entrant submits while a call is in flight
//! - failures surface as a single notice and leave the buffer intact
//! - raw vs. resolved submission modes

use std::sync::Arc;
use std::time::Duration;

use stanza::service::{ChannelService, MockChannelService};
use stanza::{
    standard_tags, Channel, ChannelKind, EditorSession, NoticeLog, Selection, Severity,
    SubmissionMode, SubmitOutcome, Tag,
};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn make_channel() -> Channel {
    Channel {
        id: "ch-100".into(),
        name: "Product Blog".into(),
        kind: ChannelKind::Blog,
        url: "https://blog.example.com".into(),
        prompt: "Write a post about {{content}} for {{title}}".into(),
        content: "the spring release".into(),
    }
}

fn open_session(
    mock: Arc<MockChannelService>,
    mode: SubmissionMode,
) -> (Arc<EditorSession>, NoticeLog) {
    let channel = make_channel();
    let notices = NoticeLog::new();
    let session = EditorSession::open(
        &channel,
        standard_tags(&channel),
        mode,
        mock,
        notices.clone(),
    );
    (Arc::new(session), notices)
}

// ============================================================================
// SUBMISSION
// ============================================================================

#[tokio::test]
async fn submit_sends_the_raw_buffer() {
    let mock = Arc::new(MockChannelService::new());
    let (session, _) = open_session(mock.clone(), SubmissionMode::Raw);

    let outcome = session.submit().await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    let (channel_id, update) = mock.last_request().unwrap();
    assert_eq!(channel_id, "ch-100");
    assert_eq!(update.name, "Product Blog");
    assert_eq!(update.channel_type, "blog");
    assert_eq!(
        update.brand_voice_initial,
        "Write a post about {{content}} for {{title}}"
    );
}

#[tokio::test]
async fn submit_resolved_mode_substitutes_markers() {
    let mock = Arc::new(MockChannelService::new());
    let (session, _) = open_session(mock.clone(), SubmissionMode::Resolved);

    session.submit().await;

    let (_, update) = mock.last_request().unwrap();
    assert_eq!(
        update.brand_voice_initial,
        "Write a post about the spring release for Product Blog"
    );
}

#[tokio::test]
async fn submit_success_emits_one_success_notice() {
    let mock = Arc::new(MockChannelService::new());
    let (session, notices) = open_session(mock, SubmissionMode::Raw);

    session.submit().await;

    assert_eq!(notices.len(), 1);
    assert_eq!(notices.with_severity(Severity::Success).len(), 1);
}

// ============================================================================
// BUSY GUARD
// ============================================================================

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected() {
    let mock = Arc::new(MockChannelService::new().with_delay(Duration::from_millis(80)));
    let (session, _) = open_session(mock.clone(), SubmissionMode::Raw);

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.submit().await })
    };

    // Give the first submit time to take the guard and park in the mock
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(session.is_busy());

    let second = session.submit().await;
    assert_eq!(second, SubmitOutcome::Busy);

    let first = first.await.unwrap();
    assert_eq!(first, SubmitOutcome::Saved);

    // Exactly one backend invocation for the burst
    assert_eq!(mock.request_count(), 1);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn guard_clears_after_failure_allowing_retry() {
    let mock = Arc::new(MockChannelService::new());
    mock.queue_failure("backend down");
    let (session, _) = open_session(mock.clone(), SubmissionMode::Raw);

    assert_eq!(session.submit().await, SubmitOutcome::Failed);
    assert!(!session.is_busy());

    // Manual retry goes through once the guard has cleared
    assert_eq!(session.submit().await, SubmitOutcome::Saved);
    assert_eq!(mock.request_count(), 2);
}

// ============================================================================
// FAILURE HANDLING
// ============================================================================

#[tokio::test]
async fn failure_emits_one_error_notice_and_keeps_buffer() {
    let mock = Arc::new(MockChannelService::new());
    mock.queue_failure("row not found");
    let (session, notices) = open_session(mock, SubmissionMode::Raw);
    let before = session.text();

    let outcome = session.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(session.text(), before);

    let errors = notices.with_severity(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Product Blog"));
    assert_eq!(notices.len(), 1);
}

// ============================================================================
// EDITING THROUGH THE SESSION
// ============================================================================

#[tokio::test]
async fn inserted_marker_is_submitted() {
    let mock = Arc::new(MockChannelService::new());
    let (session, _) = open_session(mock.clone(), SubmissionMode::Raw);

    session.set_text("Post for ");
    session.set_selection(Selection::caret(9));
    assert!(session.insert_tag(&Tag::new("date", "").unwrap()));

    session.submit().await;

    let (_, update) = mock.last_request().unwrap();
    assert_eq!(update.brand_voice_initial, "Post for {{date}}");
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let mock_a = Arc::new(MockChannelService::new());
    let mock_b = Arc::new(MockChannelService::new());
    let (a, _) = open_session(mock_a.clone(), SubmissionMode::Raw);
    let (b, _) = open_session(mock_b.clone(), SubmissionMode::Raw);

    a.set_text("only in a");
    a.set_selection(Selection::caret(0));

    assert_eq!(b.text(), "Write a post about {{content}} for {{title}}");
    assert_eq!(b.selection(), None);

    a.submit().await;
    assert_eq!(mock_a.request_count(), 1);
    assert_eq!(mock_b.request_count(), 0);
}

// ============================================================================
// MOCK SERVICE CONTRACT
// ============================================================================

#[tokio::test]
async fn mock_service_reports_its_name() {
    let mock = MockChannelService::new();
    assert_eq!(mock.name(), "mock");
}

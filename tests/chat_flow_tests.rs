use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use async_trait::async_trait;
use captr::Screen;
use captr::core::action::{Action, Effect, update};
use captr::core::chat::ChatKind;
use captr::core::config::ResolvedConfig;
use captr::core::content::{CannedReply, Content};
use captr::core::notes::{Clipboard, ClipboardError, Document};
use captr::core::responder::{ReplyOutcome, ReplyRequest, Responder, ScriptedResponder};
use captr::core::state::{App, NotificationLevel};
use captr::core::transcript::{CodeBlock, Role};
use captr::tui::EffectRunner;

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Default)]
struct RecordingClipboard {
    writes: Vec<String>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Never answers, so only the timeout can end the request.
struct SilentResponder;

#[async_trait]
impl Responder for SilentResponder {
    fn name(&self) -> &str {
        "silent"
    }

    async fn reply(&self, _request: ReplyRequest) -> ReplyOutcome {
        std::future::pending().await
    }
}

struct Harness {
    app: App,
    runner: EffectRunner<RecordingClipboard>,
    rx: mpsc::Receiver<Action>,
}

impl Harness {
    fn new(responder: Arc<dyn Responder>, config: ResolvedConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(
            responder,
            RecordingClipboard::default(),
            config.export_dir.clone(),
            config.reply_timeout,
            tx,
        );
        Self {
            app: App::new(Content::default(), &config),
            runner,
            rx,
        }
    }

    fn scripted(delay_ms: u64) -> Self {
        let config = ResolvedConfig {
            reply_delay: Duration::from_millis(delay_ms),
            ..ResolvedConfig::default()
        };
        let responder = Arc::new(ScriptedResponder::from_content(
            config.reply_delay,
            &Content::default(),
        ));
        Self::new(responder, config)
    }

    fn dispatch(&mut self, action: Action) -> Effect {
        let effect = update(&mut self.app, action);
        self.runner.apply(effect.clone());
        effect
    }

    /// Feed every queued result back through `update`, the way the event loop does.
    fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.rx.try_recv() {
            let delivered = match &action {
                Action::ReplyFinished { kind, .. } => Some(*kind),
                _ => None,
            };
            let effect = update(&mut self.app, action);
            if let Some(kind) = delivered {
                self.runner
                    .reply_delivered(kind, self.app.chat(kind).is_pending());
            }
            self.runner.apply(effect);
            count += 1;
        }
        count
    }

    fn roles(&self, kind: ChatKind) -> Vec<Role> {
        self.app
            .chat(kind)
            .transcript()
            .messages()
            .iter()
            .map(|m| m.role)
            .collect()
    }
}

fn submit(kind: ChatKind, text: &str) -> Action {
    Action::Submit {
        kind,
        text: text.to_string(),
    }
}

// ============================================================================
// Reply Flow
// ============================================================================

#[tokio::test(start_paused = true)]
async fn prototype_reply_arrives_after_delay() {
    let mut h = Harness::scripted(1000);
    h.dispatch(Action::Navigate(Screen::Prototype));
    h.dispatch(submit(ChatKind::Prototype, "Hello"));

    assert_eq!(h.roles(ChatKind::Prototype), vec![Role::User]);
    assert!(h.app.prototype_chat.is_pending());

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(h.drain(), 0);
    assert!(h.app.prototype_chat.is_pending());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(h.drain(), 1);
    assert_eq!(
        h.roles(ChatKind::Prototype),
        vec![Role::User, Role::Assistant]
    );
    assert!(!h.app.prototype_chat.is_pending());
    assert!(!h.runner.is_tracking(ChatKind::Prototype));

    let block = h.app.prototype_chat.transcript().last_code_block().unwrap();
    assert_eq!(block.id, "code-1");
    assert_eq!(block.language, "tsx");
}

#[tokio::test(start_paused = true)]
async fn submits_while_pending_or_blank_are_ignored() {
    let mut h = Harness::scripted(1000);
    assert_eq!(h.dispatch(submit(ChatKind::Notes, "   ")), Effect::None);
    let seeded = h.app.notes_chat.transcript().len();

    h.dispatch(submit(ChatKind::Notes, "Summarize again"));
    assert_eq!(h.dispatch(submit(ChatKind::Notes, "And again")), Effect::None);
    assert_eq!(h.app.notes_chat.transcript().len(), seeded + 1);

    tokio::time::sleep(Duration::from_millis(1001)).await;
    h.drain();
    assert_eq!(h.app.notes_chat.transcript().len(), seeded + 2);
    assert_eq!(
        h.app.notes_chat.transcript().last().unwrap().role,
        Role::Assistant
    );
}

#[tokio::test(start_paused = true)]
async fn silent_responder_times_out_with_error_toast() {
    let config = ResolvedConfig {
        reply_timeout: Duration::from_millis(500),
        ..ResolvedConfig::default()
    };
    let mut h = Harness::new(Arc::new(SilentResponder), config);
    h.dispatch(submit(ChatKind::Prototype, "Hello"));

    tokio::time::sleep(Duration::from_millis(501)).await;
    assert_eq!(h.drain(), 1);

    assert_eq!(h.roles(ChatKind::Prototype), vec![Role::User]);
    assert!(!h.app.prototype_chat.is_pending());
    let n = h.app.notification.as_ref().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert_eq!(n.title, "No reply");

    // The view accepts input again
    assert!(matches!(
        h.dispatch(submit(ChatKind::Prototype, "Retry")),
        Effect::SpawnReply { .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn new_chat_discards_in_flight_reply() {
    let mut h = Harness::scripted(1000);
    h.dispatch(submit(ChatKind::Prototype, "Hello"));
    h.dispatch(Action::NewChat(ChatKind::Prototype));
    assert!(!h.runner.is_tracking(ChatKind::Prototype));

    tokio::time::sleep(Duration::from_secs(5)).await;
    h.drain();
    assert!(h.app.prototype_chat.transcript().is_empty());
}

// ============================================================================
// Notes Actions
// ============================================================================

#[test]
fn download_writes_notes_file_and_notifies_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = ResolvedConfig {
        export_dir: dir.path().to_path_buf(),
        ..ResolvedConfig::default()
    };
    let mut h = Harness::new(Arc::new(SilentResponder), config);

    h.dispatch(Action::DownloadNotes);
    assert!(h.app.notification.is_none());
    assert_eq!(h.drain(), 1);

    let path: PathBuf = dir.path().join("AI-Notes-Chat_notes.md");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        h.app.document.markdown
    );
    let n = h.app.notification.as_ref().unwrap();
    assert_eq!(n.title, "Notes downloaded!");
    assert_eq!(n.seq, 1);
}

#[test]
fn copy_code_without_reply_asks_for_one() {
    let mut h = Harness::new(Arc::new(SilentResponder), ResolvedConfig::default());

    h.dispatch(Action::CopyCode);
    assert_eq!(
        h.app.notification.as_ref().unwrap().title,
        "Nothing to copy"
    );
    assert!(h.runner.clipboard().writes.is_empty());

    h.dispatch(Action::CopyNotes);
    h.drain();
    assert_eq!(h.runner.clipboard().writes, vec![h.app.document.markdown.clone()]);
    assert_eq!(
        h.app.notification.as_ref().unwrap().title,
        "Notes copied to clipboard!"
    );
}

#[tokio::test(start_paused = true)]
async fn copy_code_after_reply_uses_latest_block() {
    let mut h = Harness::scripted(1000);
    h.dispatch(Action::Navigate(Screen::Prototype));
    h.dispatch(submit(ChatKind::Prototype, "Make a button"));

    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(h.drain(), 1);

    h.dispatch(Action::CopyCode);
    h.drain();
    let expected = Content::default().prototype_reply.code_blocks[0].code.clone();
    assert_eq!(h.runner.clipboard().writes, vec![expected]);
    assert_eq!(
        h.app.notification.as_ref().unwrap().title,
        "Code copied to clipboard!"
    );
}

#[tokio::test(start_paused = true)]
async fn every_copy_click_notifies_exactly_once() {
    let huge = "x".repeat(1 << 20);
    let prototype = CannedReply {
        content: "Here it is".to_string(),
        code_blocks: vec![CodeBlock::new("code-1", "tsx", huge.clone())],
    };
    let responder = ScriptedResponder::new(
        Duration::from_millis(10),
        Content::default().notes_reply,
        prototype,
    );
    let mut h = Harness::new(Arc::new(responder), ResolvedConfig::default());
    h.dispatch(submit(ChatKind::Prototype, "Big component please"));
    tokio::time::sleep(Duration::from_millis(11)).await;
    h.drain();
    assert!(h.app.prototype_chat.transcript().last_code_block().is_some());

    let documents = [String::new(), huge.clone(), "# Short".to_string()];
    let mut last_seq = h.app.notification.as_ref().map_or(0, |n| n.seq);
    for round in 0..6 {
        let action = if round % 2 == 0 {
            h.app.document = Document::new("Notes", documents[round / 2].clone());
            Action::CopyNotes
        } else {
            Action::CopyCode
        };
        h.dispatch(action);

        let results: Vec<Action> = h.rx.try_iter().collect();
        assert_eq!(results.len(), 1, "round {round}");
        for result in results {
            assert!(matches!(result, Action::CopyFinished { result: Ok(()), .. }));
            update(&mut h.app, result);
        }

        let seq = h.app.notification.as_ref().unwrap().seq;
        assert_eq!(seq, last_seq + 1, "round {round}");
        last_seq = seq;
    }

    let writes = &h.runner.clipboard().writes;
    assert_eq!(writes.len(), 6);
    assert_eq!(writes[0], "");
    assert_eq!(writes[1].len(), 1 << 20);
    assert_eq!(writes[2].len(), 1 << 20);
}

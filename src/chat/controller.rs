//! The conversation controller.
//!
//! [`ConversationController`] owns the transcript, the pending draft and the
//! single-flight flag.  It turns every webhook outcome, including failures,
//! into exactly one bot message so callers never see an error from a turn.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::chat::config::{ChatConfig, DEFAULT_ERROR_REPLY, DEFAULT_FALLBACK_REPLY};
use crate::chat::render::Renderer;
use crate::chat::transcript::Transcript;
use crate::client::Webhook;
use crate::error::Result;
use crate::observability::{SENDS_SKIPPED, TURNS_FAILED, TURNS_FALLBACK, TURNS_REPLIED};
use crate::types::{ChatRequest, MessageRecord, Role, SessionToken};

/// Why a send was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The draft was empty or only whitespace.
    EmptyDraft,
    /// A previous send has not finished yet.
    AwaitingReply,
}

/// The result of one call to [`ConversationController::send_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Nothing was sent and nothing was appended.
    Skipped(SkipReason),
    /// The webhook answered with reply text.
    Replied(MessageRecord),
    /// The webhook answered without recognizable text; the fallback was used.
    Fallback(MessageRecord),
    /// The webhook call failed; the apology was used.
    Failed(MessageRecord),
}

impl SendOutcome {
    /// The bot record appended for this turn, if the turn ran.
    pub fn record(&self) -> Option<&MessageRecord> {
        match self {
            SendOutcome::Skipped(_) => None,
            SendOutcome::Replied(record)
            | SendOutcome::Fallback(record)
            | SendOutcome::Failed(record) => Some(record),
        }
    }

    /// Returns true when the send was ignored.
    pub fn is_skipped(&self) -> bool {
        matches!(self, SendOutcome::Skipped(_))
    }
}

/// Whether a turn is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Ready for the next send.
    Idle,
    /// Waiting on the webhook.
    Sending,
}

/// Aggregated stats for a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// The session token sent with every request.
    pub session_id: String,
    /// The number of records in the transcript, greeting included.
    pub message_count: usize,
    /// Records typed by the user.
    pub user_messages: usize,
    /// Records produced by the bot, greeting included.
    pub bot_messages: usize,
    /// Turns answered with webhook text.
    pub turns_replied: u64,
    /// Turns answered with the fallback text.
    pub turns_fallback: u64,
    /// Turns that ended in the apology message.
    pub turns_failed: u64,
    /// Sends ignored because the draft was blank or a reply was pending.
    pub sends_skipped: u64,
    /// Whether a reply is awaited right now.
    pub awaiting_reply: bool,
}

struct ControllerState {
    transcript: Transcript,
    pending_input: String,
    turns_replied: u64,
    turns_fallback: u64,
    turns_failed: u64,
    sends_skipped: u64,
}

/// Drives one conversation against a [`Webhook`].
///
/// All methods take `&self`; share the controller behind an `Arc` when the
/// input loop and the sender run on different tasks.  At most one
/// [`send_message`](Self::send_message) is in flight at a time: the others
/// return [`SendOutcome::Skipped`] without touching the transcript.
pub struct ConversationController<W: Webhook> {
    webhook: W,
    config: ChatConfig,
    session: SessionToken,
    awaiting_reply: AtomicBool,
    state: Mutex<ControllerState>,
}

impl<W: Webhook> ConversationController<W> {
    /// Creates a controller whose transcript holds the configured greeting.
    pub fn new(webhook: W, config: ChatConfig) -> Self {
        let transcript = Transcript::initialize(config.greeting.clone());
        Self {
            webhook,
            config,
            session: SessionToken::generate(),
            awaiting_reply: AtomicBool::new(false),
            state: Mutex::new(ControllerState {
                transcript,
                pending_input: String::new(),
                turns_replied: 0,
                turns_fallback: 0,
                turns_failed: 0,
                sends_skipped: 0,
            }),
        }
    }

    /// Sends one user message and records the bot's answer.
    ///
    /// This method:
    /// 1. Ignores blank drafts and drafts sent while a reply is pending
    /// 2. Appends the trimmed user message and clears the draft
    /// 3. Shows the typing indicator and calls the webhook
    /// 4. Appends the reply text, the fallback, or the apology
    /// 5. Hides the typing indicator and hands focus back to the input
    pub async fn send_message(&self, draft: &str, renderer: &mut dyn Renderer) -> SendOutcome {
        let text = draft.trim();
        if text.is_empty() {
            return self.skip(SkipReason::EmptyDraft);
        }
        if self
            .awaiting_reply
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return self.skip(SkipReason::AwaitingReply);
        }

        {
            let mut state = self.lock();
            state.pending_input.clear();
            if let Some(record) = state.transcript.append(MessageRecord::user(text)) {
                renderer.render_record(record);
            }
        }
        renderer.set_typing(true);

        let request = ChatRequest::new(text, &self.session);
        let outcome = match self.webhook.send(&request).await {
            Ok(reply) => match reply.text() {
                Some(text) => SendOutcome::Replied(MessageRecord::bot(text)),
                None => SendOutcome::Fallback(MessageRecord::bot(configured_text(
                    &self.config.fallback_reply,
                    DEFAULT_FALLBACK_REPLY,
                ))),
            },
            Err(_) => SendOutcome::Failed(MessageRecord::bot(configured_text(
                &self.config.error_reply,
                DEFAULT_ERROR_REPLY,
            ))),
        };

        {
            let mut state = self.lock();
            match &outcome {
                SendOutcome::Replied(_) => {
                    TURNS_REPLIED.click();
                    state.turns_replied += 1;
                }
                SendOutcome::Fallback(_) => {
                    TURNS_FALLBACK.click();
                    state.turns_fallback += 1;
                }
                SendOutcome::Failed(_) => {
                    TURNS_FAILED.click();
                    state.turns_failed += 1;
                }
                SendOutcome::Skipped(_) => {}
            }
            if let Some(record) = outcome.record()
                && let Some(record) = state.transcript.append(record.clone())
            {
                renderer.render_record(record);
            }
        }

        self.awaiting_reply.store(false, Ordering::Release);
        renderer.set_typing(false);
        self.auto_save_transcript(renderer);
        renderer.focus_input();
        outcome
    }

    /// Sends the pending draft.
    pub async fn send_draft(&self, renderer: &mut dyn Renderer) -> SendOutcome {
        let draft = self.draft();
        self.send_message(&draft, renderer).await
    }

    /// Replaces the pending draft.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().pending_input = text.into();
    }

    /// The pending draft.
    pub fn draft(&self) -> String {
        self.lock().pending_input.clone()
    }

    /// Whether the send control should be enabled right now.
    pub fn can_send(&self) -> bool {
        !self.is_awaiting_reply() && !self.lock().pending_input.trim().is_empty()
    }

    /// Returns true while a send is in flight.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply.load(Ordering::Acquire)
    }

    /// The current turn state.
    pub fn turn_state(&self) -> TurnState {
        if self.is_awaiting_reply() {
            TurnState::Sending
        } else {
            TurnState::Idle
        }
    }

    /// A snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    /// Renders every record in order.
    pub fn render_transcript(&self, renderer: &mut dyn Renderer) {
        let state = self.lock();
        for record in state.transcript.iter() {
            renderer.render_record(record);
        }
    }

    /// The token sent with every request of this conversation.
    pub fn session_token(&self) -> &SessionToken {
        &self.session
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Exports the transcript to `path`.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.lock().transcript.save_to(path, &self.session)
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        let state = self.lock();
        SessionStats {
            session_id: self.session.to_string(),
            message_count: state.transcript.len(),
            user_messages: state.transcript.count(Role::User),
            bot_messages: state.transcript.count(Role::Bot),
            turns_replied: state.turns_replied,
            turns_fallback: state.turns_fallback,
            turns_failed: state.turns_failed,
            sends_skipped: state.sends_skipped,
            awaiting_reply: self.is_awaiting_reply(),
        }
    }

    fn skip(&self, reason: SkipReason) -> SendOutcome {
        SENDS_SKIPPED.click();
        self.lock().sends_skipped += 1;
        SendOutcome::Skipped(reason)
    }

    fn auto_save_transcript(&self, renderer: &mut dyn Renderer) {
        if let Some(path) = &self.config.transcript_path
            && let Err(err) = self.save_transcript_to(path)
        {
            renderer.print_error(&format!("Failed to save transcript: {err}"));
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `text` unless it is blank; `ChatConfig` fields can be set directly.
fn configured_text<'a>(text: &'a str, default: &'a str) -> &'a str {
    if text.trim().is_empty() {
        default
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use serde_json::json;
    use tokio::sync::{Notify, oneshot};

    use super::*;
    use crate::chat::transcript::DEFAULT_GREETING;
    use crate::error::Error;
    use crate::types::WebhookReply;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Record(Role, String),
        Typing(bool),
        Focus,
        Error(String),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<Event>,
    }

    impl Renderer for RecordingRenderer {
        fn render_record(&mut self, record: &MessageRecord) {
            self.events
                .push(Event::Record(record.role(), record.text().to_string()));
        }

        fn set_typing(&mut self, typing: bool) {
            self.events.push(Event::Typing(typing));
        }

        fn focus_input(&mut self) {
            self.events.push(Event::Focus);
        }

        fn print_banner(&mut self, _: &str) {}

        fn print_error(&mut self, error: &str) {
            self.events.push(Event::Error(error.to_string()));
        }

        fn print_info(&mut self, _: &str) {}
    }

    /// Answers with queued results, recording every request.
    #[derive(Default)]
    struct ScriptedWebhook {
        replies: Mutex<VecDeque<Result<WebhookReply>>>,
        requests: Arc<Mutex<Vec<ChatRequest>>>,
    }

    impl ScriptedWebhook {
        fn replying(replies: Vec<Result<WebhookReply>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Arc::default(),
            }
        }
    }

    #[async_trait::async_trait]
    impl Webhook for ScriptedWebhook {
        async fn send(&self, request: &ChatRequest) -> Result<WebhookReply> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::connection("script exhausted", None)))
        }
    }

    /// Blocks inside `send` until released.
    struct GatedWebhook {
        entered: Arc<Notify>,
        release: Mutex<Option<oneshot::Receiver<()>>>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Webhook for GatedWebhook {
        async fn send(&self, _: &ChatRequest) -> Result<WebhookReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let release = self.release.lock().unwrap().take();
            self.entered.notify_one();
            if let Some(release) = release {
                let _ = release.await;
            }
            Ok(WebhookReply::new(json!({"output": "listo"})))
        }
    }

    fn ok(body: serde_json::Value) -> Result<WebhookReply> {
        Ok(WebhookReply::new(body))
    }

    #[test]
    fn new_controller_has_greeting_only() {
        let controller = ConversationController::new(ScriptedWebhook::default(), ChatConfig::new());
        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.records()[0].role(), Role::Bot);
        assert!(!transcript.records()[0].text().is_empty());
        assert_eq!(controller.turn_state(), TurnState::Idle);
    }

    #[test]
    fn custom_greeting() {
        let config = ChatConfig::new().with_greeting("¡Buenas!");
        let controller = ConversationController::new(ScriptedWebhook::default(), config);
        assert_eq!(controller.transcript().records()[0].text(), "¡Buenas!");
    }

    #[tokio::test]
    async fn blank_configured_text_never_commits_empty_records() {
        let webhook = ScriptedWebhook::replying(vec![Err(Error::status(500, "boom"))]);
        let config = ChatConfig::new().with_greeting("").with_error_reply("");
        let controller = ConversationController::new(webhook, config);
        let mut renderer = RecordingRenderer::default();

        controller.send_message("hola", &mut renderer).await;
        let texts: Vec<String> = controller
            .transcript()
            .iter()
            .map(|r| r.text().to_string())
            .collect();
        assert_eq!(
            texts,
            vec![
                DEFAULT_GREETING.to_string(),
                "hola".to_string(),
                DEFAULT_ERROR_REPLY.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn blank_config_fields_fall_back_to_defaults() {
        let webhook = ScriptedWebhook::replying(vec![
            ok(json!({"foo": "bar"})),
            Err(Error::connection("refused", None)),
        ]);
        let mut config = ChatConfig::new();
        config.greeting = String::new();
        config.fallback_reply = " ".to_string();
        config.error_reply = String::new();
        let controller = ConversationController::new(webhook, config);
        let mut renderer = RecordingRenderer::default();

        let fallback = controller.send_message("uno", &mut renderer).await;
        assert_eq!(fallback.record().unwrap().text(), DEFAULT_FALLBACK_REPLY);
        let failed = controller.send_message("dos", &mut renderer).await;
        assert_eq!(failed.record().unwrap().text(), DEFAULT_ERROR_REPLY);

        let transcript = controller.transcript();
        assert_eq!(transcript.records()[0].text(), DEFAULT_GREETING);
        assert!(transcript.iter().all(|r| !r.text().is_empty()));
    }

    #[tokio::test]
    async fn blank_drafts_are_ignored() {
        let webhook = ScriptedWebhook::default();
        let requests = Arc::clone(&webhook.requests);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        for draft in ["", " ", "\t\n", "   \r\n  "] {
            let outcome = controller.send_message(draft, &mut renderer).await;
            assert_eq!(outcome, SendOutcome::Skipped(SkipReason::EmptyDraft));
            assert!(!controller.is_awaiting_reply());
        }

        assert_eq!(controller.transcript().len(), 1);
        assert!(requests.lock().unwrap().is_empty());
        assert!(renderer.events.is_empty());
        assert_eq!(controller.stats().sends_skipped, 4);
    }

    #[tokio::test]
    async fn reply_from_output_field() {
        let webhook = ScriptedWebhook::replying(vec![ok(json!({"output": "Keep going!"}))]);
        let requests = Arc::clone(&webhook.requests);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        let outcome = controller
            .send_message("  me siento sin ganas  ", &mut renderer)
            .await;

        assert!(matches!(outcome, SendOutcome::Replied(_)));
        assert_eq!(outcome.record().unwrap().text(), "Keep going!");

        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 3);
        let user = &transcript.records()[1];
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.text(), "me siento sin ganas");
        let bot = &transcript.records()[2];
        assert_eq!(bot.role(), Role::Bot);
        assert_eq!(bot.text(), "Keep going!");

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].chat_input, "me siento sin ganas");
        assert_eq!(requests[0].session_id, controller.session_token().as_str());

        assert_eq!(
            renderer.events,
            vec![
                Event::Record(Role::User, "me siento sin ganas".to_string()),
                Event::Typing(true),
                Event::Record(Role::Bot, "Keep going!".to_string()),
                Event::Typing(false),
                Event::Focus,
            ]
        );
        assert!(!controller.is_awaiting_reply());
    }

    #[tokio::test]
    async fn unrecognized_reply_uses_fallback() {
        let webhook = ScriptedWebhook::replying(vec![ok(json!({"foo": "bar"}))]);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        let outcome = controller.send_message("hola", &mut renderer).await;

        assert!(matches!(outcome, SendOutcome::Fallback(_)));
        let transcript = controller.transcript();
        assert_eq!(transcript.last().unwrap().text(), DEFAULT_FALLBACK_REPLY);
        assert_eq!(controller.stats().turns_fallback, 1);
    }

    #[tokio::test]
    async fn custom_fallback_text() {
        let webhook = ScriptedWebhook::replying(vec![ok(json!({"output": ""}))]);
        let config = ChatConfig::new().with_fallback_reply("Keep at it");
        let controller = ConversationController::new(webhook, config);
        let mut renderer = RecordingRenderer::default();

        controller.send_message("hola", &mut renderer).await;
        assert_eq!(controller.transcript().last().unwrap().text(), "Keep at it");
    }

    #[tokio::test]
    async fn failures_append_one_apology() {
        let webhook = ScriptedWebhook::replying(vec![
            Err(Error::status(500, "boom")),
            Err(Error::connection("connection refused", None)),
            Err(Error::serialization("expected value", None)),
        ]);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        for (turn, draft) in ["uno", "dos", "tres"].iter().enumerate() {
            let before = controller.transcript().len();
            let outcome = controller.send_message(draft, &mut renderer).await;
            assert!(matches!(outcome, SendOutcome::Failed(_)));

            let transcript = controller.transcript();
            assert_eq!(transcript.len(), before + 2);
            let bot = transcript.last().unwrap();
            assert_eq!(bot.role(), Role::Bot);
            assert_eq!(bot.text(), DEFAULT_ERROR_REPLY);
            assert!(!controller.is_awaiting_reply());
            assert_eq!(controller.stats().turns_failed, turn as u64 + 1);
        }
    }

    #[tokio::test]
    async fn can_send_after_failure() {
        let webhook = ScriptedWebhook::replying(vec![
            Err(Error::timeout("slow", Some(60.0))),
            ok(json!({"text": "de vuelta"})),
        ]);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        controller.send_message("hola", &mut renderer).await;
        let outcome = controller.send_message("hola otra vez", &mut renderer).await;
        assert_eq!(outcome.record().unwrap().text(), "de vuelta");
    }

    #[tokio::test]
    async fn session_token_is_stable_within_a_session() {
        let webhook = ScriptedWebhook::replying(vec![
            ok(json!({"output": "uno"})),
            ok(json!({"output": "dos"})),
        ]);
        let requests = Arc::clone(&webhook.requests);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        controller.send_message("a", &mut renderer).await;
        controller.send_message("b", &mut renderer).await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].session_id, requests[1].session_id);
        assert_eq!(requests[0].session_id, controller.session_token().as_str());
    }

    #[test]
    fn session_tokens_differ_across_sessions() {
        let first = ConversationController::new(ScriptedWebhook::default(), ChatConfig::new());
        let second = ConversationController::new(ScriptedWebhook::default(), ChatConfig::new());
        assert_ne!(first.session_token(), second.session_token());
    }

    #[tokio::test]
    async fn second_send_while_awaiting_is_skipped() {
        let (release_tx, release_rx) = oneshot::channel();
        let entered = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let webhook = GatedWebhook {
            entered: Arc::clone(&entered),
            release: Mutex::new(Some(release_rx)),
            calls: Arc::clone(&calls),
        };
        let controller = Arc::new(ConversationController::new(webhook, ChatConfig::new()));

        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                let mut renderer = RecordingRenderer::default();
                controller.send_message("primero", &mut renderer).await
            })
        };
        entered.notified().await;

        assert!(controller.is_awaiting_reply());
        assert_eq!(controller.turn_state(), TurnState::Sending);
        controller.set_draft("segundo");
        assert!(!controller.can_send());

        let mut renderer = RecordingRenderer::default();
        let outcome = controller.send_message("segundo", &mut renderer).await;
        assert_eq!(outcome, SendOutcome::Skipped(SkipReason::AwaitingReply));
        assert_eq!(controller.transcript().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(renderer.events.is_empty());

        release_tx.send(()).unwrap();
        let outcome = first.await.unwrap();
        assert_eq!(outcome.record().unwrap().text(), "listo");
        assert!(!controller.is_awaiting_reply());
        assert!(controller.can_send());

        let texts: Vec<String> = controller
            .transcript()
            .iter()
            .map(|r| r.text().to_string())
            .collect();
        assert_eq!(texts[1..], ["primero".to_string(), "listo".to_string()]);
        assert_eq!(controller.draft(), "segundo");
    }

    #[tokio::test]
    async fn send_draft_clears_pending_input() {
        let webhook = ScriptedWebhook::replying(vec![ok(json!({"message": "bien hecho"}))]);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        assert!(!controller.can_send());
        controller.set_draft("  terminé el proyecto ");
        assert!(controller.can_send());

        let outcome = controller.send_draft(&mut renderer).await;
        assert_eq!(outcome.record().unwrap().text(), "bien hecho");
        assert_eq!(controller.draft(), "");
        assert!(!controller.can_send());
        assert_eq!(
            controller.transcript().records()[1].text(),
            "terminé el proyecto"
        );
    }

    #[tokio::test]
    async fn stats_track_turns() {
        let webhook = ScriptedWebhook::replying(vec![
            ok(json!({"output": "sí"})),
            ok(json!({})),
            Err(Error::status(404, "")),
        ]);
        let controller = ConversationController::new(webhook, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        for draft in ["a", "b", "c", " "] {
            controller.send_message(draft, &mut renderer).await;
        }

        let stats = controller.stats();
        assert_eq!(stats.session_id, controller.session_token().to_string());
        assert_eq!(stats.message_count, 7);
        assert_eq!(stats.user_messages, 3);
        assert_eq!(stats.bot_messages, 4);
        assert_eq!(stats.turns_replied, 1);
        assert_eq!(stats.turns_fallback, 1);
        assert_eq!(stats.turns_failed, 1);
        assert_eq!(stats.sends_skipped, 1);
        assert!(!stats.awaiting_reply);
    }

    #[tokio::test]
    async fn auto_save_failure_is_reported_not_fatal() {
        let webhook = ScriptedWebhook::replying(vec![ok(json!({"output": "vale"}))]);
        let config = ChatConfig::new()
            .with_transcript_path(Some("/nonexistent/animo/transcript.json".into()));
        let controller = ConversationController::new(webhook, config);
        let mut renderer = RecordingRenderer::default();

        let outcome = controller.send_message("hola", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Replied(_)));
        assert!(
            renderer
                .events
                .iter()
                .any(|e| matches!(e, Event::Error(msg) if msg.starts_with("Failed to save transcript")))
        );
    }

    #[test]
    fn render_transcript_replays_records() {
        let controller = ConversationController::new(ScriptedWebhook::default(), ChatConfig::new());
        let mut renderer = RecordingRenderer::default();
        controller.render_transcript(&mut renderer);
        assert_eq!(renderer.events.len(), 1);
        assert!(matches!(renderer.events[0], Event::Record(Role::Bot, _)));
    }
}

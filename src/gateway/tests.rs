use super::*;
use async_trait::async_trait;
use neko_core::{error::NekoError, lang::Lang, prompts};
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

struct StubProvider {
    /// Recorded (system_prompt, user_text) pairs.
    calls: Mutex<Vec<(String, String)>>,
    /// `Err` simulates a gateway failure of any kind.
    response: Result<String, String>,
}

impl StubProvider {
    fn ok(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Ok(reply.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Err("connection refused".to_string()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, NekoError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_text.to_string()));
        self.response
            .clone()
            .map_err(NekoError::Provider)
    }

    async fn is_available(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Text(String),
    Photo { url: String, caption: String },
}

#[derive(Default)]
struct StubChannel {
    sent: Mutex<Vec<Reply>>,
}

impl StubChannel {
    fn replies(&self) -> Vec<Reply> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for StubChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, NekoError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), NekoError> {
        self.sent.lock().unwrap().push(Reply::Text(message.text));
        Ok(())
    }

    async fn send_photo_url(
        &self,
        _target: &str,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), NekoError> {
        self.sent.lock().unwrap().push(Reply::Photo {
            url: photo_url.to_string(),
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), NekoError> {
        Ok(())
    }
}

const AVATAR: &str = "https://example.com/kitten.gif";

fn gateway(provider: Arc<StubProvider>) -> (Gateway, Arc<StubChannel>) {
    let channel = Arc::new(StubChannel::default());
    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
    channels.insert("telegram".to_string(), channel.clone());
    let gw = Gateway::new(provider, channels, AVATAR.to_string());
    (gw, channel)
}

fn msg(sender_id: &str, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: uuid::Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: sender_id.to_string(),
        sender_name: Some("tester".to_string()),
        text: text.to_string(),
        timestamp: chrono::Utc::now(),
        reply_target: Some("100".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

#[test]
fn test_classify_start() {
    assert_eq!(Event::classify("/start"), Event::Start);
    assert_eq!(Event::classify("/start@neko_bot"), Event::Start);
}

#[test]
fn test_classify_language_commands() {
    assert_eq!(Event::classify("/ru"), Event::SelectLanguage(Lang::Ru));
    assert_eq!(Event::classify("/en"), Event::SelectLanguage(Lang::En));
    assert_eq!(Event::classify("/es"), Event::SelectLanguage(Lang::Es));
    assert_eq!(Event::classify("/ru@neko_bot"), Event::SelectLanguage(Lang::Ru));
}

#[test]
fn test_classify_freeform() {
    assert_eq!(
        Event::classify("Hello there"),
        Event::Freeform("Hello there".to_string())
    );
    // Unknown commands pass through as freeform text.
    assert_eq!(
        Event::classify("/weather"),
        Event::Freeform("/weather".to_string())
    );
    assert_eq!(Event::classify("  "), Event::Freeform("  ".to_string()));
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_start_sends_welcome_photo() {
    let provider = StubProvider::ok("unused");
    let (gw, channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "/start")).await;

    let replies = channel.replies();
    assert_eq!(replies.len(), 1);
    match &replies[0] {
        Reply::Photo { url, caption } => {
            assert_eq!(url, AVATAR);
            for cmd in ["/ru", "/en", "/es"] {
                assert!(caption.contains(cmd), "welcome should list {cmd}");
            }
        }
        other => panic!("expected photo reply, got {other:?}"),
    }
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_freeform_without_language_sends_plain_reminder() {
    let provider = StubProvider::ok("unused");
    let (gw, channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "Hello")).await;

    // No provider call, and the reminder is plain text, not a photo.
    assert!(provider.calls().is_empty());
    assert_eq!(
        channel.replies(),
        vec![Reply::Text(prompts::PICK_LANGUAGE_REMINDER.to_string())]
    );
}

#[tokio::test]
async fn test_select_then_freeform_relays_with_russian_prompt() {
    let provider = StubProvider::ok("Привет!");
    let (gw, channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "/ru")).await;
    gw.handle_message(msg("1", "Hello")).await;

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, prompts::system_prompt(Some(Lang::Ru)));
    assert_eq!(calls[0].1, "Hello");

    let replies = channel.replies();
    assert_eq!(replies.len(), 2);
    assert_eq!(
        replies[0],
        Reply::Photo {
            url: AVATAR.to_string(),
            caption: prompts::language_confirmation(Lang::Ru),
        }
    );
    assert_eq!(
        replies[1],
        Reply::Photo {
            url: AVATAR.to_string(),
            caption: "Привет!".to_string(),
        }
    );
}

#[tokio::test]
async fn test_provider_failure_sends_apology_photo() {
    let provider = StubProvider::failing();
    let (gw, channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "/en")).await;
    gw.handle_message(msg("1", "Hello")).await;

    assert_eq!(provider.calls().len(), 1);
    let replies = channel.replies();
    // Confirmation, then the apology — still in the photo shape.
    assert_eq!(
        replies[1],
        Reply::Photo {
            url: AVATAR.to_string(),
            caption: prompts::APOLOGY.to_string(),
        }
    );
}

#[tokio::test]
async fn test_repeated_selection_is_idempotent() {
    let provider = StubProvider::ok("Meow");
    let (gw, channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "/en")).await;
    gw.handle_message(msg("1", "/en")).await;

    let replies = channel.replies();
    assert_eq!(replies.len(), 2);
    for reply in &replies {
        match reply {
            Reply::Photo { caption, .. } => assert!(caption.contains("English")),
            other => panic!("expected photo confirmation, got {other:?}"),
        }
    }

    // The stored code is still "en": a follow-up message uses the English prompt.
    gw.handle_message(msg("1", "Hi")).await;
    assert_eq!(
        provider.calls()[0].0,
        prompts::system_prompt(Some(Lang::En))
    );
}

#[tokio::test]
async fn test_language_overwrite() {
    let provider = StubProvider::ok("Hola");
    let (gw, _channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "/ru")).await;
    gw.handle_message(msg("1", "/es")).await;
    gw.handle_message(msg("1", "Hola gatito")).await;

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, prompts::system_prompt(Some(Lang::Es)));
}

#[tokio::test]
async fn test_users_do_not_share_language_state() {
    let provider = StubProvider::ok("ok");
    let (gw, channel) = gateway(provider.clone());

    gw.handle_message(msg("1", "/ru")).await;
    gw.handle_message(msg("2", "Hello")).await;

    // User 2 never picked a language, so they get the reminder even though
    // user 1 has a selection.
    assert!(provider.calls().is_empty());
    assert_eq!(
        channel.replies().last(),
        Some(&Reply::Text(prompts::PICK_LANGUAGE_REMINDER.to_string()))
    );
}

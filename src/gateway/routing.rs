//! Inbound event classification and the per-event routing logic.

use super::Gateway;
use neko_core::{
    lang::Lang,
    message::IncomingMessage,
    prompts::{self, APOLOGY, PICK_LANGUAGE_REMINDER, WELCOME},
};
use tracing::{error, info, warn};

/// What an inbound message means, classified once at the dispatch boundary.
///
/// The command set is closed here: there is no "unrecognized language"
/// path, and unknown `/foo` tokens fall through to `Freeform`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start` — welcome flow.
    Start,
    /// `/ru`, `/en`, or `/es` — language selection.
    SelectLanguage(Lang),
    /// Anything else goes to the completion provider verbatim.
    Freeform(String),
}

impl Event {
    /// Classify message text into an event.
    pub fn classify(text: &str) -> Self {
        let Some(first) = text.split_whitespace().next() else {
            return Self::Freeform(text.to_string());
        };
        // Strip @botname suffix (e.g. "/ru@neko_bot" → "/ru").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Self::Start,
            "/ru" => Self::SelectLanguage(Lang::Ru),
            "/en" => Self::SelectLanguage(Lang::En),
            "/es" => Self::SelectLanguage(Lang::Es),
            _ => Self::Freeform(text.to_string()),
        }
    }
}

impl Gateway {
    /// Process a single incoming message.
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) {
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        info!(
            "[{}] {} says: {}",
            incoming.channel,
            incoming.sender_name.as_deref().unwrap_or("unknown"),
            preview
        );

        match Event::classify(&incoming.text) {
            Event::Start => {
                self.send_photo(&incoming, WELCOME).await;
            }
            Event::SelectLanguage(lang) => {
                self.languages.set(&incoming.sender_id, lang);
                info!("user {} selected language {}", incoming.sender_id, lang.code());
                self.send_photo(&incoming, &prompts::language_confirmation(lang))
                    .await;
            }
            Event::Freeform(text) => {
                self.handle_freeform(&incoming, &text).await;
            }
        }
    }

    /// Relay a freeform message to the provider and deliver the reply.
    async fn handle_freeform(&self, incoming: &IncomingMessage, text: &str) {
        // No language chosen yet: remind, and never touch the provider.
        let Some(lang) = self.languages.get(&incoming.sender_id) else {
            self.send_text(incoming, PICK_LANGUAGE_REMINDER).await;
            return;
        };

        // Best-effort typing indicator while the completion is in flight.
        if let (Some(target), Some(channel)) = (
            incoming.reply_target.as_deref(),
            self.channels.get(&incoming.channel),
        ) {
            if let Err(e) = channel.send_typing(target).await {
                warn!("typing indicator failed: {e}");
            }
        }

        let system_prompt = prompts::system_prompt(Some(lang));
        let caption = match self.provider.complete(system_prompt, text).await {
            Ok(reply) => reply,
            Err(e) => {
                // Logged for operators; the user only ever sees the apology.
                error!("completion failed for {}: {e}", incoming.sender_id);
                APOLOGY.to_string()
            }
        };

        self.send_photo(incoming, &caption).await;
    }
}

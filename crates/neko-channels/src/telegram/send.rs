//! Message sending: text, photos by URL, chat actions, command registration.

use super::TelegramChannel;
use neko_core::error::NekoError;
use tracing::{info, warn};

/// Telegram caps photo captions at 1024 characters.
const CAPTION_LIMIT: usize = 1024;

/// Truncate a caption to the Telegram limit, respecting char boundaries.
pub(crate) fn truncate_caption(text: &str) -> &str {
    if text.chars().count() <= CAPTION_LIMIT {
        return text;
    }
    let end = text
        .char_indices()
        .nth(CAPTION_LIMIT)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

impl TelegramChannel {
    /// Send a text message to a specific chat.
    pub(crate) async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), NekoError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NekoError::Channel(format!("telegram send failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(NekoError::Channel(format!(
                "telegram send failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }

    /// Send a photo by URL with a caption to a chat.
    pub(crate) async fn send_photo(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), NekoError> {
        let url = format!("{}/sendPhoto", self.base_url);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "photo": photo_url,
            "caption": truncate_caption(caption),
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NekoError::Channel(format!("telegram sendPhoto failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(NekoError::Channel(format!(
                "telegram sendPhoto failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Welcome and language list" },
                { "command": "ru", "description": "Русский" },
                { "command": "en", "description": "English" },
                { "command": "es", "description": "Español" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }

    /// Send a chat action (e.g. "typing") to a chat.
    pub(crate) async fn send_chat_action(
        &self,
        chat_id: i64,
        action: &str,
    ) -> Result<(), NekoError> {
        let url = format!("{}/sendChatAction", self.base_url);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "action": action,
        });

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NekoError::Channel(format!("telegram sendChatAction failed: {e}")))?;

        Ok(())
    }
}

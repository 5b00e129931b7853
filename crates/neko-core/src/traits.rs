use crate::error::NekoError;
use crate::message::{IncomingMessage, OutgoingMessage};
use async_trait::async_trait;

/// Completion provider trait — the brain.
///
/// Wraps one call to a hosted completion API: a system-role instruction plus
/// the user's text in, generated text out. Implementations never panic across
/// this boundary; every failure comes back as a `NekoError`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Send one (system, user) message pair and return the generated text.
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, NekoError>;

    /// Check if the provider is available and ready.
    async fn is_available(&self) -> bool;
}

/// Messaging channel trait — the nervous system.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, NekoError>;

    /// Send a plain text response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), NekoError>;

    /// Send a photo by URL with a text caption.
    async fn send_photo_url(
        &self,
        target: &str,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), NekoError>;

    /// Send a typing indicator to show the bot is processing.
    async fn send_typing(&self, _target: &str) -> Result<(), NekoError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), NekoError>;
}

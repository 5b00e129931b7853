//! Gateway — the main event loop connecting channels to the completion
//! provider, with per-user language routing and graceful shutdown.

mod routing;

#[cfg(test)]
mod tests;

pub use routing::Event;

use neko_core::{
    lang::LanguageStore,
    message::{IncomingMessage, OutgoingMessage},
    traits::{Channel, Provider},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The central gateway that routes messages between channels and the provider.
pub struct Gateway {
    provider: Arc<dyn Provider>,
    channels: HashMap<String, Arc<dyn Channel>>,
    /// Per-user language selections, process lifetime only.
    languages: LanguageStore,
    /// Fixed image attached to every photo reply.
    avatar_url: String,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        provider: Arc<dyn Provider>,
        channels: HashMap<String, Arc<dyn Channel>>,
        avatar_url: String,
    ) -> Self {
        Self {
            provider,
            channels,
            languages: LanguageStore::new(),
            avatar_url,
        }
    }

    /// Run the main event loop.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "Neko gateway running | provider: {} | channels: {}",
            self.provider.name(),
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        // Main event loop with graceful shutdown. Each message is handled in
        // its own task so one slow provider call never blocks other users.
        loop {
            tokio::select! {
                Some(incoming) = rx.recv() => {
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                error!("failed to stop channel {name}: {e}");
            }
        }
        info!("Shutdown complete.");
        Ok(())
    }

    /// Send a plain text message back to the sender.
    async fn send_text(&self, incoming: &IncomingMessage, text: &str) {
        let msg = OutgoingMessage {
            text: text.to_string(),
            reply_target: incoming.reply_target.clone(),
        };

        if let Some(channel) = self.channels.get(&incoming.channel) {
            if let Err(e) = channel.send(msg).await {
                error!("failed to send message: {e}");
            }
        }
    }

    /// Send the avatar photo with a caption back to the sender.
    async fn send_photo(&self, incoming: &IncomingMessage, caption: &str) {
        let Some(target) = incoming.reply_target.as_deref() else {
            error!("no reply_target on incoming message, dropping photo reply");
            return;
        };

        if let Some(channel) = self.channels.get(&incoming.channel) {
            if let Err(e) = channel
                .send_photo_url(target, &self.avatar_url, caption)
                .await
            {
                error!("failed to send photo reply: {e}");
            }
        }
    }
}

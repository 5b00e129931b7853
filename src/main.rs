mod gateway;

use clap::{Parser, Subcommand};
use neko_channels::telegram::TelegramChannel;
use neko_core::{config, traits::Provider};
use neko_providers::GroqProvider;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "neko",
    version,
    about = "Neko 🐾 — Multilingual kitten-persona AI assistant for Telegram"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check configuration and provider availability.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let cfg = config::load(&cli.config)?;
            cfg.validate()?;

            // Build provider.
            let provider: Arc<dyn Provider> = Arc::new(GroqProvider::from_config(&cfg.groq));
            if !provider.is_available().await {
                anyhow::bail!("provider '{}' is not available", provider.name());
            }

            // Build channels.
            let mut channels: HashMap<String, Arc<dyn neko_core::traits::Channel>> =
                HashMap::new();
            let telegram = TelegramChannel::new(&cfg.telegram);
            channels.insert("telegram".to_string(), Arc::new(telegram));

            println!("🐾 {} — Starting bot...", cfg.neko.name);
            let gw = Arc::new(gateway::Gateway::new(
                provider,
                channels,
                cfg.telegram.avatar_url.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            println!("🐾 Neko — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Model: {}", cfg.groq.model);
            println!(
                "Telegram token: {}",
                if cfg.telegram.bot_token.is_empty() {
                    "missing"
                } else {
                    "set"
                }
            );

            let provider = GroqProvider::from_config(&cfg.groq);
            println!(
                "Groq API: {}",
                if provider.is_available().await {
                    "available"
                } else {
                    "not available"
                }
            );
        }
    }

    Ok(())
}

//! TOML configuration with serde defaults and environment overrides.
//!
//! Secrets (`TELEGRAM_TOKEN`, `GROQ_API_KEY`) and the avatar URL
//! (`AVATAR_URL`) can be supplied via environment variables, which take
//! precedence over the file. Missing config file means all defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::NekoError;

/// Top-level Neko configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub neko: NekoConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub groq: GroqConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NekoConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for NekoConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Fixed image attached to every photo reply.
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            avatar_url: default_avatar_url(),
        }
    }
}

/// Groq completion API config (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-request timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_groq_base_url(),
            model: default_groq_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_name() -> String {
    "Neko 🐾".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_avatar_url() -> String {
    "https://github.com/alekseignatovich-sketch/ai-telegram-bot/blob/513f6ac6c0e072b4ced65c5ebdaabc202c139619/kitten.gif".to_string()
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Overlay environment variables onto file-provided values.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("TELEGRAM_TOKEN") {
            if !token.is_empty() {
                self.telegram.bot_token = token;
            }
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                self.groq.api_key = key;
            }
        }
        if let Ok(url) = std::env::var("AVATAR_URL") {
            if !url.is_empty() {
                self.telegram.avatar_url = url;
            }
        }
    }

    /// Fail-fast credential check, run once at startup.
    pub fn validate(&self) -> Result<(), NekoError> {
        if self.telegram.bot_token.is_empty() {
            return Err(NekoError::Config(
                "Telegram bot_token is empty. Set it in config.toml or the \
                 TELEGRAM_TOKEN env var."
                    .into(),
            ));
        }
        if self.groq.api_key.is_empty() {
            return Err(NekoError::Config(
                "Groq api_key is empty. Set it in config.toml or the \
                 GROQ_API_KEY env var."
                    .into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file, then overlay env vars.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, NekoError> {
    let path = Path::new(path);

    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NekoError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| NekoError::Config(format!("failed to parse config: {}", e)))?
    } else {
        tracing::info!("Config file not found at {}, using defaults", path.display());
        Config::default()
    };

    config.apply_env();
    Ok(config)
}

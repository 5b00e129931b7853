//! Fixed prompt catalog and user-facing reply strings.
//!
//! One kitten-persona instruction per supported language; anything outside
//! the closed set falls back to English. All strings are immutable for the
//! life of the process.

use crate::lang::Lang;

const SYSTEM_PROMPT_RU: &str = "Ты дружелюбный, умный и полезный помощник. \
     Отвечай кратко, чётко и с эмодзи. Ты — милый котёнок 🐾.";

const SYSTEM_PROMPT_EN: &str = "You are a friendly, smart, and helpful assistant. \
     Respond briefly, clearly, and with emojis. You are a cute kitten 🐾.";

const SYSTEM_PROMPT_ES: &str = "Eres un asistente amable, inteligente y útil. \
     Responde brevemente, claramente y con emojis. Eres un gatito adorable 🐾.";

/// Welcome caption listing the language commands.
pub const WELCOME: &str = "👋 Привет! Я — ваш AI-помощник с милым котёнком!\n\n\
     Пожалуйста, выберите язык:\n\
     /ru — Русский\n\
     /en — English\n\
     /es — Español";

/// Plain-text reminder for users who message before picking a language.
pub const PICK_LANGUAGE_REMINDER: &str =
    "Пожалуйста, сначала выберите язык: /ru, /en или /es";

/// Caption sent when the completion provider fails.
pub const APOLOGY: &str = "😿 Извините, сейчас не могу ответить. Попробуйте позже.";

/// System prompt for a language selection; `None` falls back to English.
pub fn system_prompt(lang: Option<Lang>) -> &'static str {
    match lang {
        Some(Lang::Ru) => SYSTEM_PROMPT_RU,
        Some(Lang::Es) => SYSTEM_PROMPT_ES,
        Some(Lang::En) | None => SYSTEM_PROMPT_EN,
    }
}

/// Confirmation caption naming the chosen language.
pub fn language_confirmation(lang: Lang) -> String {
    format!("✅ Выбран язык: {}", lang.display_name())
}

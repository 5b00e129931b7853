//! Supported languages and the per-user language selection store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// The closed set of languages a user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    En,
    Es,
}

impl Lang {
    /// Short code used in commands and config (e.g. "ru").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Native display name, used in selection confirmations.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ru => "Русский",
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    /// Parse a short code. Returns `None` for anything outside the closed set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Self::Ru),
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

/// In-memory per-user language selections.
///
/// Held for the process lifetime only — selections are lost on restart by
/// design. Constructed once and injected into the gateway so tests can use
/// an isolated instance.
#[derive(Debug, Default)]
pub struct LanguageStore {
    inner: Mutex<HashMap<String, Lang>>,
}

impl LanguageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user's selection, overwriting any prior value.
    pub fn set(&self, user_id: &str, lang: Lang) {
        self.inner
            .lock()
            .expect("language store lock poisoned")
            .insert(user_id.to_string(), lang);
    }

    /// Look up a user's selection. `None` means the user never picked one.
    pub fn get(&self, user_id: &str) -> Option<Lang> {
        self.inner
            .lock()
            .expect("language store lock poisoned")
            .get(user_id)
            .copied()
    }
}

//! UI preferences and "remember me" credentials kept in durable slots.

use hris_core::error::Result;
use hris_core::i18n::Language;
use hris_core::storage::{slots, SlotStorage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Reads and writes the theme, language and remember-me slots.
///
/// Unknown stored values fall back to defaults rather than failing.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn SlotStorage>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> Theme {
        self.read(slots::THEME)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.storage.write(slots::THEME, &theme.to_string())
    }

    pub fn language(&self) -> Language {
        self.read(slots::LANGUAGE)
            .map(|v| Language::from_code(&v))
            .unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.storage.write(slots::LANGUAGE, language.code())
    }

    /// Email to prefill on the sign-in form, if the user asked to be remembered.
    pub fn remembered_email(&self) -> Option<String> {
        let remember = self.read(slots::REMEMBER_ME).is_some_and(|v| v == "true");
        if !remember {
            return None;
        }
        self.read(slots::REMEMBER_EMAIL).filter(|e| !e.is_empty())
    }

    /// Stores or forgets the sign-in email. Passwords are never stored.
    pub fn remember(&self, email: Option<&str>) -> Result<()> {
        match email {
            Some(email) => {
                self.storage.write(slots::REMEMBER_EMAIL, email)?;
                self.storage.write(slots::REMEMBER_ME, "true")
            }
            None => {
                self.storage.remove(slots::REMEMBER_EMAIL)?;
                self.storage.remove(slots::REMEMBER_ME)
            }
        }
    }

    fn read(&self, slot: &str) -> Option<String> {
        match self.storage.read(slot) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read preference slot: {}", e);
                None
            }
        }
    }
}

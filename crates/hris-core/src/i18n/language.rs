use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Languages with a compiled-in catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Bahasa Indonesia
    Id,
    /// English
    En,
}

impl Language {
    /// Language used when a lookup misses or a code is not recognized.
    pub const DEFAULT: Language = Language::Id;

    /// Maps a language code to a supported language.
    ///
    /// Region suffixes are ignored (`en-US` and `en_GB` both map to `En`).
    /// Anything unrecognized maps to [`Language::DEFAULT`].
    pub fn from_code(code: &str) -> Language {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        primary.parse().unwrap_or(Self::DEFAULT)
    }

    /// Returns the lowercase code, e.g. `"id"`.
    pub fn code(&self) -> &str {
        self.as_ref()
    }

    /// All supported languages, default first.
    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("id"), Language::Id);
        assert_eq!(Language::from_code(" EN "), Language::En);
    }

    #[test]
    fn test_region_suffix_is_ignored() {
        assert_eq!(Language::from_code("en-US"), Language::En);
        assert_eq!(Language::from_code("id_ID"), Language::Id);
    }

    #[test]
    fn test_unknown_code_falls_back_to_default() {
        assert_eq!(Language::from_code("xx"), Language::DEFAULT);
        assert_eq!(Language::from_code(""), Language::DEFAULT);
        assert_eq!(Language::DEFAULT, Language::Id);
    }

    #[test]
    fn test_code_round_trip() {
        for language in Language::all() {
            assert_eq!(Language::from_code(language.code()), language);
        }
    }
}

//! Key resolution with default-language fallback and `{name}` interpolation.

use super::{CatalogNode, Catalogs, Language};
use std::collections::BTreeMap;

/// Named values substituted into `{name}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationParams {
    values: BTreeMap<String, String>,
}

impl TranslationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, converting the value with `ToString`.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TranslationParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |params, (k, v)| params.with(k, v))
    }
}

/// Resolves dot-path keys against a set of catalogs.
///
/// Resolution never fails: a key that cannot be resolved in either the
/// requested or the default language comes back verbatim, so a missing
/// translation shows up in the UI instead of crashing it.
#[derive(Debug, Clone)]
pub struct Translator {
    catalogs: Catalogs,
}

impl Translator {
    pub fn new(catalogs: Catalogs) -> Self {
        Self { catalogs }
    }

    /// Translator over the compiled-in catalogs.
    pub fn builtin() -> crate::Result<Self> {
        Ok(Self::new(Catalogs::builtin()?))
    }

    /// Translates `key` for a language code. Unknown codes use the default language.
    pub fn t(&self, language_code: &str, key: &str, params: &TranslationParams) -> String {
        self.t_lang(Language::from_code(language_code), key, params)
    }

    /// Translates `key` for a supported language.
    pub fn t_lang(&self, language: Language, key: &str, params: &TranslationParams) -> String {
        match self.resolve(language, key) {
            Some(text) => interpolate(text, params),
            None => key.to_string(),
        }
    }

    /// Looks up the raw template for `key`, falling back to the default language.
    ///
    /// Returns `None` when neither catalog has the path, or when the path
    /// ends on a group rather than a string.
    pub fn resolve(&self, language: Language, key: &str) -> Option<&str> {
        let segments: Vec<&str> = key.split('.').collect();

        let node = self
            .walk(language, &segments)
            .or_else(|| self.walk(Language::DEFAULT, &segments));

        match node {
            Some(CatalogNode::Text(text)) => Some(text.as_str()),
            Some(CatalogNode::Group(_)) | None => {
                tracing::trace!(key, language = %language, "Untranslated key");
                None
            }
        }
    }

    /// Leaf paths in the default catalog that `language` does not define.
    pub fn missing_keys(&self, language: Language) -> Vec<String> {
        let Some(default_catalog) = self.catalogs.get(Language::DEFAULT) else {
            return Vec::new();
        };
        default_catalog
            .leaf_paths()
            .into_iter()
            .filter(|path| {
                let segments: Vec<&str> = path.split('.').collect();
                !matches!(
                    self.walk(language, &segments),
                    Some(CatalogNode::Text(_))
                )
            })
            .collect()
    }

    fn walk(&self, language: Language, segments: &[&str]) -> Option<&CatalogNode> {
        self.catalogs.get(language)?.lookup(segments)
    }
}

/// Replaces `{name}` placeholders present in `params`.
///
/// Placeholders without a matching parameter, and unterminated braces,
/// are copied through unchanged.
pub fn interpolate(template: &str, params: &TranslationParams) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find(['{', '}']) {
            Some(close) if after_open.as_bytes()[close] == b'}' => {
                let name = &after_open[..close];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            _ => {
                // Not a placeholder; keep the brace and continue after it.
                out.push('{');
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn translator() -> Translator {
        let mut catalogs = Catalogs::default();
        catalogs.insert(
            Language::Id,
            Catalog::from_json(
                Language::Id,
                r#"{
                    "common": { "save": "Simpan", "cancel": "Batal" },
                    "only": { "indonesian": "Hanya di sini" },
                    "greeting": "Halo {name}, Anda punya {count} pesan"
                }"#,
            )
            .unwrap(),
        );
        catalogs.insert(
            Language::En,
            Catalog::from_json(
                Language::En,
                r#"{
                    "common": { "save": "Save", "cancel": "Cancel" },
                    "greeting": "Hello {name}, you have {count} messages",
                    "plain": "No placeholders here"
                }"#,
            )
            .unwrap(),
        );
        Translator::new(catalogs)
    }

    #[test]
    fn test_resolves_requested_language() {
        let t = translator();
        assert_eq!(t.t("en", "common.save", &TranslationParams::new()), "Save");
        assert_eq!(t.t("id", "common.save", &TranslationParams::new()), "Simpan");
    }

    #[test]
    fn test_unknown_language_uses_default() {
        let t = translator();
        assert_eq!(t.t("xx", "common.save", &TranslationParams::new()), "Simpan");
    }

    #[test]
    fn test_missing_key_falls_back_to_default_language() {
        let t = translator();
        assert_eq!(
            t.t("en", "only.indonesian", &TranslationParams::new()),
            "Hanya di sini"
        );
    }

    #[test]
    fn test_full_miss_returns_key_in_every_language() {
        let t = translator();
        for language in Language::all() {
            assert_eq!(
                t.t_lang(language, "nowhere.to.be.found", &TranslationParams::new()),
                "nowhere.to.be.found"
            );
        }
    }

    #[test]
    fn test_group_path_returns_key() {
        let t = translator();
        assert_eq!(t.t("en", "common", &TranslationParams::new()), "common");
    }

    #[test]
    fn test_interpolates_all_params() {
        let t = translator();
        let params = TranslationParams::new().with("name", "Rina").with("count", 3);
        assert_eq!(
            t.t("en", "greeting", &params),
            "Hello Rina, you have 3 messages"
        );
    }

    #[test]
    fn test_missing_param_left_literal() {
        let t = translator();
        let params = TranslationParams::new().with("name", "Rina");
        assert_eq!(
            t.t("en", "greeting", &params),
            "Hello Rina, you have {count} messages"
        );
    }

    #[test]
    fn test_params_ignored_without_placeholders() {
        let t = translator();
        let params = TranslationParams::new().with("unused", "x");
        assert_eq!(t.t("en", "plain", &params), "No placeholders here");
    }

    #[test]
    fn test_interpolate_unterminated_brace() {
        let params = TranslationParams::new().with("a", "X");
        assert_eq!(interpolate("{a} and {b", &params), "X and {b");
        assert_eq!(interpolate("{{a}", &params), "{X");
        assert_eq!(interpolate("{}", &params), "{}");
    }

    #[test]
    fn test_params_from_iter() {
        let params: TranslationParams = [("a", "X"), ("b", "Y")].into_iter().collect();
        assert_eq!(interpolate("{a}-{b}", &params), "X-Y");
    }

    #[test]
    fn test_missing_keys_lists_drift() {
        let t = translator();
        assert_eq!(t.missing_keys(Language::En), vec!["only.indonesian"]);
        assert!(t.missing_keys(Language::Id).is_empty());
    }
}

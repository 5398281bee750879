use hris_core::i18n::{Language, TranslationParams, Translator};

#[test]
fn test_builtin_catalogs_resolve_common_keys() {
    let t = Translator::builtin().expect("Built-in catalogs should parse");
    let none = TranslationParams::new();

    assert_eq!(t.t("id", "common.save", &none), "Simpan");
    // Unknown code falls back to Indonesian
    assert_eq!(t.t("xx", "common.save", &none), "Simpan");
    assert_eq!(
        t.t("en", "validation.minLength", &TranslationParams::new().with("min", 8)),
        "Minimum 8 characters"
    );
    assert_eq!(
        t.t("id", "validation.minLength", &TranslationParams::new().with("min", 8)),
        "Minimal 8 karakter"
    );
}

#[test]
fn test_builtin_catalogs_have_no_drift() {
    let t = Translator::builtin().expect("Built-in catalogs should parse");
    for language in Language::all() {
        assert!(
            t.missing_keys(language).is_empty(),
            "{} is missing keys: {:?}",
            language,
            t.missing_keys(language)
        );
    }
}

#[test]
fn test_unknown_key_is_returned_verbatim() {
    let t = Translator::builtin().expect("Built-in catalogs should parse");
    assert_eq!(
        t.t_lang(Language::En, "does.not.exist", &TranslationParams::new()),
        "does.not.exist"
    );
}

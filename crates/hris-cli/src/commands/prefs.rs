use super::context::AppContext;
use anyhow::{Context, Result};
use hris_core::i18n::Language;
use hris_infrastructure::Theme;

pub fn show(ctx: &AppContext) {
    println!("theme: {}", ctx.prefs.theme());
    println!("language: {}", ctx.prefs.language());
    if let Some(email) = ctx.prefs.remembered_email() {
        println!("remembered email: {}", email);
    }
}

pub fn set_theme(ctx: &AppContext, value: &str) -> Result<()> {
    let theme: Theme = value
        .parse()
        .with_context(|| format!("Unknown theme '{}', expected light, dark or system", value))?;
    ctx.prefs.set_theme(theme)?;
    println!("theme: {}", theme);
    Ok(())
}

pub fn set_language(ctx: &AppContext, value: &str) -> Result<()> {
    let language: Language = value.parse().with_context(|| {
        let supported: Vec<String> = Language::all().map(|l| l.to_string()).collect();
        format!("Unsupported language '{}', expected one of {}", value, supported.join(", "))
    })?;
    ctx.prefs.set_language(language)?;
    println!("language: {}", language);
    Ok(())
}

use super::context::AppContext;
use anyhow::{Context, Result};
use hris_core::i18n::{Language, TranslationParams, Translator};

pub fn translate(ctx: &AppContext, key: &str, lang: Option<String>, params: &[String]) -> Result<()> {
    let params = parse_params(params)?;
    let language = match lang {
        Some(code) => Language::from_code(&code),
        None => ctx.prefs.language(),
    };
    println!("{}", ctx.translator.t_lang(language, key, &params));
    Ok(())
}

pub fn check() -> Result<()> {
    let translator = Translator::builtin().context("Failed to load translations")?;
    let mut missing_total = 0;

    for language in Language::all().filter(|l| *l != Language::DEFAULT) {
        let missing = translator.missing_keys(language);
        if missing.is_empty() {
            println!("{}: complete", language);
            continue;
        }
        println!("{}: {} missing", language, missing.len());
        for key in &missing {
            println!("  {}", key);
        }
        missing_total += missing.len();
    }

    if missing_total > 0 {
        anyhow::bail!("{} translation(s) missing", missing_total);
    }
    Ok(())
}

fn parse_params(raw: &[String]) -> Result<TranslationParams> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .with_context(|| format!("Invalid parameter '{}', expected NAME=VALUE", pair))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&["min=8".to_string(), "name=a=b".to_string()]).unwrap();
        assert_eq!(params.get("min"), Some("8"));
        assert_eq!(params.get("name"), Some("a=b"));
    }

    #[test]
    fn test_parse_params_rejects_missing_equals() {
        assert!(parse_params(&["min".to_string()]).is_err());
    }

    #[test]
    fn test_builtin_catalogs_complete() {
        check().unwrap();
    }
}

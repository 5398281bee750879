//! Localization: translation catalogs and the key resolver.
//!
//! # Module Structure
//!
//! - `language`: Supported language codes and the default language
//! - `catalog`: Nested key trees and the compiled-in catalogs
//! - `translator`: Key resolution, fallback and `{name}` interpolation
//!
//! # Usage
//!
//! ```
//! use hris_core::i18n::{TranslationParams, Translator};
//!
//! let translator = Translator::builtin().unwrap();
//! assert_eq!(translator.t("id", "common.save", &TranslationParams::new()), "Simpan");
//! assert_eq!(
//!     translator.t("en", "validation.minLength", &TranslationParams::new().with("min", 8)),
//!     "Minimum 8 characters"
//! );
//! ```

mod catalog;
mod language;
mod translator;

pub use catalog::{Catalog, CatalogNode, Catalogs};
pub use language::Language;
pub use translator::{interpolate, TranslationParams, Translator};

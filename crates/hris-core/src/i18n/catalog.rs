//! Translation catalogs: nested key trees, one per language.

use super::Language;
use crate::error::{HrisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A node in a catalog tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogNode {
    Text(String),
    Group(BTreeMap<String, CatalogNode>),
}

/// The full key tree for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    root: BTreeMap<String, CatalogNode>,
}

impl Catalog {
    /// Parses a catalog from a JSON object.
    pub fn from_json(language: Language, source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| HrisError::Catalog {
            language: language.code().to_string(),
            message: e.to_string(),
        })
    }

    /// Walks `segments` through the tree.
    ///
    /// Returns `None` as soon as a segment is missing or the walk hits a
    /// text node before the path ends.
    pub fn lookup(&self, segments: &[&str]) -> Option<&CatalogNode> {
        let (first, rest) = segments.split_first()?;
        let mut node = self.root.get(*first)?;
        for segment in rest {
            node = match node {
                CatalogNode::Group(children) => children.get(*segment)?,
                CatalogNode::Text(_) => return None,
            };
        }
        Some(node)
    }

    /// Dot-joined paths of every text leaf, sorted.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaves(&self.root, String::new(), &mut paths);
        paths
    }
}

fn collect_leaves(group: &BTreeMap<String, CatalogNode>, prefix: String, out: &mut Vec<String>) {
    for (key, node) in group {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match node {
            CatalogNode::Text(_) => out.push(path),
            CatalogNode::Group(children) => collect_leaves(children, path, out),
        }
    }
}

/// Catalogs for every supported language.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    by_language: HashMap<Language, Catalog>,
}

impl Catalogs {
    /// Loads the catalogs compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let mut catalogs = Self::default();
        for language in Language::all() {
            let source = match language {
                Language::Id => include_str!("../../locales/id.json"),
                Language::En => include_str!("../../locales/en.json"),
            };
            catalogs.insert(language, Catalog::from_json(language, source)?);
        }
        Ok(catalogs)
    }

    pub fn insert(&mut self, language: Language, catalog: Catalog) {
        self.by_language.insert(language, catalog);
    }

    pub fn get(&self, language: Language) -> Option<&Catalog> {
        self.by_language.get(&language)
    }
}

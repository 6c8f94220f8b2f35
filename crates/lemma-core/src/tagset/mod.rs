//! Part-of-speech tagset normalization.
//!
//! Every supported tagset maps its raw tags onto the coarse Universal Tagset
//! (`NOUN`, `VERB`, `ADJ`, ...). Tables are registered under a
//! `<tagset>_<language>` key, e.g. `penn_en` or `freeling_en`.

mod tables;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::lang::LanguageTag;

/// A static tag table: `(raw_tag, universal_tag)` pairs.
pub type TagTable = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagsetError {
    #[error("tagset mapping for `{key}` was not found")]
    UnknownTagset { key: String },

    #[error("invalid tagset language tag: {0:?}")]
    InvalidLanguage(String),
}

/// Named collection of tag tables, immutable once built.
#[derive(Debug, Default)]
pub struct TagsetRegistry {
    tables: BTreeMap<String, TagTable>,
}

impl TagsetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every table shipped in this crate.
    pub fn builtin() -> &'static TagsetRegistry {
        static INSTANCE: OnceLock<TagsetRegistry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut registry = TagsetRegistry::new();
            registry.register("penn", "en", tables::PENN_EN);
            registry.register("freeling", "en", tables::FREELING_EN);
            registry.register("wordnet", "en", tables::WORDNET_EN);
            registry
        })
    }

    /// Register `table` under `<name>_<language>`. A later registration for
    /// the same key replaces the earlier one.
    pub fn register(&mut self, name: &str, language: &str, table: TagTable) -> &mut Self {
        self.tables.insert(table_key(name, language), table);
        self
    }

    /// Registered keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Resolve the mapper for `name` and a language tag such as `en-GB`.
    ///
    /// Only the base language subtag takes part in the lookup.
    pub fn mapper(&self, name: &str, language_tag: &str) -> Result<PosMapper, TagsetError> {
        let lang = LanguageTag::parse(language_tag)
            .map_err(|_| TagsetError::InvalidLanguage(language_tag.to_string()))?;
        let key = table_key(name, lang.base());
        let table = self
            .tables
            .get(&key)
            .ok_or(TagsetError::UnknownTagset { key: key.clone() })?;
        Ok(PosMapper {
            key,
            map: table.iter().copied().collect(),
        })
    }
}

fn table_key(name: &str, language: &str) -> String {
    format!("{}_{}", name.to_ascii_lowercase(), language.to_ascii_lowercase())
}

/// Lookup from raw tags of one tagset into the Universal Tagset.
#[derive(Debug, Clone)]
pub struct PosMapper {
    key: String,
    map: HashMap<&'static str, &'static str>,
}

impl PosMapper {
    /// The `<tagset>_<language>` key this mapper was built from.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn map(&self, raw: &str) -> Option<&'static str> {
        self.map.get(raw).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Mapper from the builtin registry.
pub fn map_pos(name: &str, language_tag: &str) -> Result<PosMapper, TagsetError> {
    TagsetRegistry::builtin().mapper(name, language_tag)
}

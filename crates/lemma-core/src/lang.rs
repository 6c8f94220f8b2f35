//! Language-tag handling for `Lemmatizer::new`.
//!
//! The three consumers want three spellings of the same language: tagset
//! tables use the base subtag (`en`), the stemmer the English language name
//! (`english`), the speller the full tag (`en-US`).

use std::fmt;

use isolang::Language;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid language tag: {0:?}")]
pub struct LanguageTagError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    tag: String,
    base: String,
}

impl LanguageTag {
    /// Parse a BCP 47 style tag. Both `-` and `_` are accepted as subtag
    /// separators; the primary subtag must be 2 or 3 ASCII letters.
    pub fn parse(tag: &str) -> Result<Self, LanguageTagError> {
        let tag = tag.trim();
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if !(2..=3).contains(&primary.len()) || !primary.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(LanguageTagError(tag.to_string()));
        }
        Ok(Self {
            tag: tag.to_string(),
            base: primary.to_ascii_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Lowercase primary language subtag.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Lowercase English language name, e.g. `english` for `en-US`.
    pub fn english_name(&self) -> Option<String> {
        let language = match self.base.len() {
            2 => Language::from_639_1(&self.base),
            _ => Language::from_639_3(&self.base),
        }?;
        let name = language.to_name();
        // "Modern Greek (1453-)" -> "modern greek"
        let name = name.split(" (").next().unwrap_or(name);
        Some(name.to_lowercase())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

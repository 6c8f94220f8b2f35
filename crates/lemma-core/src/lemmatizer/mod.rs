//! Lemmatizer facade: dictionary lookup with stemming and spelling fallbacks.
//!
//! ```text
//! lemma(word, pos)
//!   lowercase word
//!   speller only?  -> correct word first
//!   dictionary hit -> done (found = true)
//!   no stemmer     -> NotFound
//!   stem, then correct the stem when the speller is on (found = false)
//! ```

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use tracing::{debug, debug_span};

use crate::backend::{BackendError, Speller, SpellerOptions, Stemmer};
use crate::dict::{resolve_dict_path, DictError, InstallOptions, LemmaDictionary};
use crate::lang::{LanguageTag, LanguageTagError};
use crate::pool::pool_size;
use crate::settings::LemmatizerConfig;
use crate::tagset::{TagsetError, TagsetRegistry};

/// Configuration problems detected while building. These do not go away on
/// retry; callers should treat them as fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Tagset(#[from] TagsetError),

    #[error(transparent)]
    Language(#[from] LanguageTagError),

    #[error("{backend} fallback unavailable: {source}")]
    Backend {
        backend: &'static str,
        #[source]
        source: BackendError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LemmaError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dictionary error: {0}")]
    Dict(#[from] DictError),

    #[error("lemma for `{word}` was not found")]
    NotFound { word: String },

    #[error("stemming fallback is disabled")]
    StemmerDisabled,

    #[error("fallback failed: {0}")]
    Backend(#[from] BackendError),
}

impl LemmaError {
    /// True for misconfiguration that makes the lemmatizer unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LemmaError::Config(_))
    }
}

/// A resolved lemma. `found` is true only for dictionary hits; stemmed or
/// spell-corrected fallbacks report `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    pub text: String,
    pub found: bool,
}

/// Explicit construction parameters; see `Lemmatizer::new` for the variant
/// that derives languages from a single tag.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub dict_path: PathBuf,
    pub stemmer_fallback: bool,
    /// Lowercase English language name, e.g. `english`.
    pub stemmer_language: String,
    pub speller_fallback: bool,
    /// Language tag of the word list, e.g. `en-US`.
    pub speller_language: String,
    pub speller: SpellerOptions,
    /// Empty to use the dictionary tags unchanged.
    pub tagset: String,
    pub tagset_language: String,
    pub concurrent: bool,
    pub install: InstallOptions,
}

pub struct Lemmatizer {
    dict: LemmaDictionary,
    stemmer: Option<Stemmer>,
    stemmer_language: String,
    speller: Option<Speller>,
    speller_language: String,
}

impl Lemmatizer {
    /// Build with the stemmer, speller and tagset languages all derived from
    /// `language_tag` (BCP 47, e.g. `en-US`).
    pub fn new(
        dict_path: impl AsRef<Path>,
        language_tag: &str,
        tagset: &str,
        stemmer_fallback: bool,
        speller_fallback: bool,
        concurrent: bool,
    ) -> Result<Self, LemmaError> {
        let (tagset_language, stemmer_language, speller_language) = if language_tag.trim().is_empty() {
            Default::default()
        } else {
            let tag = LanguageTag::parse(language_tag).map_err(ConfigError::from)?;
            let stemmer_language = tag.english_name().unwrap_or_else(|| tag.base().to_string());
            (tag.base().to_string(), stemmer_language, tag.as_str().to_string())
        };

        Self::build(BuildOptions {
            dict_path: dict_path.as_ref().to_path_buf(),
            stemmer_fallback,
            stemmer_language,
            speller_fallback,
            speller_language,
            tagset: tagset.to_string(),
            tagset_language,
            concurrent,
            ..BuildOptions::default()
        })
    }

    pub fn build(opts: BuildOptions) -> Result<Self, LemmaError> {
        Self::build_with_registry(opts, TagsetRegistry::builtin())
    }

    pub fn build_with_registry(opts: BuildOptions, registry: &TagsetRegistry) -> Result<Self, LemmaError> {
        let _span = debug_span!("lemmatizer_build", dict = %opts.dict_path.display()).entered();

        let mapper = if opts.tagset.is_empty() {
            None
        } else {
            Some(
                registry
                    .mapper(&opts.tagset, &opts.tagset_language)
                    .map_err(ConfigError::from)?,
            )
        };

        let path = resolve_dict_path(&opts.dict_path, &opts.install)?;
        let dict = LemmaDictionary::load(&path, mapper.as_ref())?;

        let size = pool_size(opts.concurrent);
        let stemmer = if opts.stemmer_fallback {
            let stemmer = Stemmer::start(&opts.stemmer_language, (), size)
                .map_err(|source| ConfigError::Backend { backend: "stemmer", source })?;
            Some(stemmer)
        } else {
            None
        };
        let speller = if opts.speller_fallback {
            let speller = Speller::start(&opts.speller_language, opts.speller.clone(), size)
                .map_err(|source| ConfigError::Backend { backend: "speller", source })?;
            Some(speller)
        } else {
            None
        };

        debug!(
            entries = dict.len(),
            stemmer = stemmer.is_some(),
            speller = speller.is_some(),
            workers = size.get(),
            "lemmatizer ready"
        );
        Ok(Self {
            dict,
            stemmer,
            stemmer_language: opts.stemmer_language,
            speller,
            speller_language: opts.speller_language,
        })
    }

    pub fn from_config(config: &LemmatizerConfig) -> Result<Self, LemmaError> {
        Self::build(BuildOptions {
            dict_path: config.dictionary.path.clone(),
            stemmer_fallback: config.stemmer.enabled,
            stemmer_language: config.stemmer.language.clone(),
            speller_fallback: config.speller.enabled,
            speller_language: config.speller.language.clone(),
            speller: config.speller.options(),
            tagset: config.dictionary.tagset.clone(),
            tagset_language: config.dictionary.tagset_language.clone(),
            concurrent: config.concurrent,
            install: InstallOptions {
                home: config.dictionary.home.clone(),
                bundled: None,
            },
        })
    }

    /// Resolve `word` tagged `pos` to its lemma.
    ///
    /// Without a stemmer a dictionary miss is `LemmaError::NotFound`, carrying
    /// the word as it was looked up (spell-corrected when the speller is on).
    pub fn lemma(&self, word: &str, pos: &str) -> Result<Lemma, LemmaError> {
        let _span = debug_span!("lemma", word, pos).entered();
        let mut word = word.to_lowercase();

        // With no stemmer the speller is the only way to recover from a
        // misspelling, so it runs before the lookup.
        if self.stemmer.is_none() {
            if let Some(speller) = &self.speller {
                word = speller.correct(&self.speller_language, &word)?;
            }
        }

        if let Some(lemma) = self.dict.lookup(&word, &pos.to_uppercase()) {
            return Ok(Lemma {
                text: lemma.to_string(),
                found: true,
            });
        }

        if self.stemmer.is_none() {
            return Err(LemmaError::NotFound { word });
        }

        let text = self.stem_and_correct(&word)?;
        debug!(lemma = %text, "dictionary miss, fallback used");
        Ok(Lemma { text, found: false })
    }

    /// Stem `word` without consulting the dictionary, spell-correcting the
    /// stem when the speller is enabled.
    pub fn stem(&self, word: &str) -> Result<String, LemmaError> {
        self.stem_and_correct(&word.to_lowercase())
    }

    fn stem_and_correct(&self, word: &str) -> Result<String, LemmaError> {
        let stemmer = self.stemmer.as_ref().ok_or(LemmaError::StemmerDisabled)?;
        let stem = stemmer.stem(&self.stemmer_language, word)?;
        match &self.speller {
            Some(speller) => Ok(speller.correct(&self.speller_language, &stem)?),
            None => Ok(stem),
        }
    }

    pub fn dictionary(&self) -> &LemmaDictionary {
        &self.dict
    }

    pub fn has_stemmer(&self) -> bool {
        self.stemmer.is_some()
    }

    pub fn has_speller(&self) -> bool {
        self.speller.is_some()
    }

    /// Number of workers per fallback pool (0 when no fallback is enabled or
    /// after `close`).
    pub fn workers(&self) -> usize {
        self.stemmer
            .as_ref()
            .map(Stemmer::size)
            .or_else(|| self.speller.as_ref().map(Speller::size))
            .unwrap_or(0)
    }

    /// Shut down the fallback pools. Dictionary lookups keep working;
    /// fallbacks fail with a closed-pool error afterwards.
    pub fn close(&mut self) {
        if let Some(stemmer) = &mut self.stemmer {
            stemmer.close();
        }
        if let Some(speller) = &mut self.speller {
            speller.close();
        }
    }
}

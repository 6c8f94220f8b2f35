//! Lemmatizer options shared by the subcommands that build one.
//!
//! Flags are layered over a settings file (`--config`), which in turn
//! defaults to the embedded settings.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Args;

use lemma_core::lang::{LanguageTag, LanguageTagError};
use lemma_core::settings::{self, LemmatizerConfig, SettingsError};

#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Language(#[from] LanguageTagError),
}

#[derive(Debug, Clone, Default, Args)]
pub struct LemmatizerArgs {
    /// Settings TOML (see `settings-export`)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Dictionary file; relative paths resolve inside ~/.lemma-engine
    #[arg(long)]
    pub dict: Option<PathBuf>,
    /// Language tag, e.g. en-US; sets the tagset, stemmer and speller languages
    #[arg(long)]
    pub lang: Option<String>,
    /// Universal Tagset mapping applied to the dictionary (penn, freeling, wordnet)
    #[arg(long)]
    pub tagset: Option<String>,
    /// Enable the stemming fallback
    #[arg(long)]
    pub stem: bool,
    /// Enable the spelling fallback
    #[arg(long)]
    pub spell: bool,
    /// Extra directory searched for Hunspell word lists
    #[arg(long = "spell-dir")]
    pub spell_dirs: Vec<PathBuf>,
    /// One backend worker per CPU instead of a single one
    #[arg(long)]
    pub concurrent: bool,
}

impl LemmatizerArgs {
    pub fn to_config(&self) -> Result<LemmatizerConfig, ArgsError> {
        let mut config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ArgsError::Read {
                    path: path.clone(),
                    source,
                })?;
                settings::parse_settings_toml(&content)?
            }
            None => LemmatizerConfig::default(),
        };

        if let Some(dict) = &self.dict {
            config.dictionary.path = dict.clone();
        }
        if let Some(tagset) = &self.tagset {
            config.dictionary.tagset = tagset.clone();
        }
        if let Some(lang) = &self.lang {
            let tag = LanguageTag::parse(lang)?;
            config.dictionary.tagset_language = tag.base().to_string();
            config.stemmer.language = tag.english_name().unwrap_or_else(|| tag.base().to_string());
            config.speller.language = tag.as_str().to_string();
        }
        config.stemmer.enabled |= self.stem;
        config.speller.enabled |= self.spell;
        config.concurrent |= self.concurrent;
        // command-line directories are searched before configured ones
        let mut dict_dirs = self.spell_dirs.clone();
        dict_dirs.append(&mut config.speller.dict_dirs);
        config.speller.dict_dirs = dict_dirs;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let config = LemmatizerArgs::default().to_config().unwrap();
        assert_eq!(config.dictionary.path, PathBuf::from("en.lmm"));
        assert!(!config.stemmer.enabled);
        assert!(!config.speller.enabled);
        assert!(!config.concurrent);
    }

    #[test]
    fn flags_override() {
        let args = LemmatizerArgs {
            dict: Some(PathBuf::from("/tmp/de.lmm")),
            lang: Some("de-AT".to_string()),
            tagset: Some("penn".to_string()),
            stem: true,
            spell: true,
            spell_dirs: vec![PathBuf::from("/opt/hunspell")],
            ..LemmatizerArgs::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.dictionary.path, PathBuf::from("/tmp/de.lmm"));
        assert_eq!(config.dictionary.tagset, "penn");
        assert_eq!(config.dictionary.tagset_language, "de");
        assert_eq!(config.stemmer.language, "german");
        assert_eq!(config.speller.language, "de-AT");
        assert!(config.stemmer.enabled && config.speller.enabled);
        assert_eq!(config.speller.dict_dirs, vec![PathBuf::from("/opt/hunspell")]);
    }

    #[test]
    fn config_file_then_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("lemma.toml");
        let toml = settings::default_toml()
            .replace("[stemmer]\nenabled = false", "[stemmer]\nenabled = true")
            .replace("path = \"en.lmm\"", "path = \"/srv/en.lmm\"");
        fs::write(&path, toml).unwrap();

        let args = LemmatizerArgs {
            config: Some(path),
            concurrent: true,
            ..LemmatizerArgs::default()
        };
        let config = args.to_config().unwrap();
        assert!(config.stemmer.enabled);
        assert!(config.concurrent);
        assert_eq!(config.dictionary.path, PathBuf::from("/srv/en.lmm"));
    }

    #[test]
    fn missing_config_file() {
        let args = LemmatizerArgs {
            config: Some(PathBuf::from("/nonexistent/lemma.toml")),
            ..LemmatizerArgs::default()
        };
        assert!(matches!(args.to_config(), Err(ArgsError::Read { .. })));
    }

    #[test]
    fn bad_language_flag() {
        let args = LemmatizerArgs {
            lang: Some("9".to_string()),
            ..LemmatizerArgs::default()
        };
        assert!(matches!(args.to_config(), Err(ArgsError::Language(_))));
    }
}

//! Lemmatizer configuration loaded from TOML.
//!
//! - `default_toml()` returns the embedded defaults (`default_settings.toml`)
//! - `parse_settings_toml(toml)` parses and validates a custom file
//! - `LemmatizerConfig::default()` is the parsed embedded default

use std::path::PathBuf;

use serde::Deserialize;

use crate::backend::SpellerOptions;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

const MAX_EDIT_DISTANCE: u32 = 3;

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct LemmatizerConfig {
    #[serde(default)]
    pub concurrent: bool,
    pub dictionary: DictionaryConfig,
    pub stemmer: FallbackConfig,
    pub speller: SpellerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub tagset: String,
    #[serde(default)]
    pub tagset_language: String,
    /// Overrides the dictionary home used for relative paths.
    #[serde(default)]
    pub home: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    pub enabled: bool,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpellerConfig {
    pub enabled: bool,
    pub language: String,
    pub max_edit_distance: u32,
    #[serde(default)]
    pub dict_dirs: Vec<PathBuf>,
}

impl SpellerConfig {
    /// Configured directories first, then the default search path.
    pub fn options(&self) -> SpellerOptions {
        let defaults = SpellerOptions::default();
        let mut dict_dirs = self.dict_dirs.clone();
        dict_dirs.extend(defaults.dict_dirs);
        SpellerOptions {
            dict_dirs,
            max_edit_distance: self.max_edit_distance,
        }
    }
}

impl Default for LemmatizerConfig {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<LemmatizerConfig, SettingsError> {
    let config: LemmatizerConfig =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(c: &LemmatizerConfig) -> Result<(), SettingsError> {
    fn invalid(field: &str, reason: &str) -> SettingsError {
        SettingsError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    if c.dictionary.path.as_os_str().is_empty() {
        return Err(invalid("dictionary.path", "must not be empty"));
    }
    if !c.dictionary.tagset.is_empty() && c.dictionary.tagset_language.is_empty() {
        return Err(invalid("dictionary.tagset_language", "required when a tagset is set"));
    }
    if c.stemmer.enabled && c.stemmer.language.is_empty() {
        return Err(invalid("stemmer.language", "required when the stemmer is enabled"));
    }
    if c.speller.enabled && c.speller.language.is_empty() {
        return Err(invalid("speller.language", "required when the speller is enabled"));
    }
    if !(1..=MAX_EDIT_DISTANCE).contains(&c.speller.max_edit_distance) {
        return Err(invalid("speller.max_edit_distance", "must be between 1 and 3"));
    }
    Ok(())
}

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bk_tree::{metrics, BKTree};
use tracing::debug;

use super::affix::AffixRules;
use super::{BackendError, Engine};
use crate::lang::LanguageTag;

const SPELL_DIR_ENV: &str = "LEMMA_SPELL_DIR";
const SYSTEM_DIRS: &[&str] = &["/usr/share/hunspell", "/usr/share/myspell/dicts", "/usr/share/myspell"];

#[derive(Debug, Clone)]
pub struct SpellerOptions {
    /// Directories searched, in order, for `<language>.dic`.
    pub dict_dirs: Vec<PathBuf>,
    /// Suggestions further away than this (Levenshtein) are not offered.
    pub max_edit_distance: u32,
}

impl Default for SpellerOptions {
    fn default() -> Self {
        let mut dict_dirs: Vec<PathBuf> = env::var_os(SPELL_DIR_ENV).map(PathBuf::from).into_iter().collect();
        dict_dirs.extend(SYSTEM_DIRS.iter().map(PathBuf::from));
        Self {
            dict_dirs,
            max_edit_distance: 2,
        }
    }
}

/// Spell checker over a Hunspell dictionary.
///
/// Every form the `.aff` rules generate from the `.dic` stems is known up
/// front; suggestions come from a BK-tree over those forms.
pub struct HunspellSpeller {
    language: String,
    words: HashSet<String>,
    tree: BKTree<String>,
    max_edit_distance: u32,
}

/// File stems tried for a tag: `en-US` → `en-US`, `en_US`, `en`.
fn candidate_names(language: &str) -> Vec<String> {
    let mut names = vec![language.to_string(), language.replace('-', "_")];
    if let Ok(tag) = LanguageTag::parse(language) {
        names.push(tag.base().to_string());
    }
    names.dedup();
    names
}

/// `(word, flags)` pairs of a `.dic` file.
fn dic_entries(content: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut lines = content.lines().peekable();
    // Hunspell files start with an approximate word count.
    if lines
        .peek()
        .is_some_and(|first| !first.trim().is_empty() && first.trim().bytes().all(|b| b.is_ascii_digit()))
    {
        lines.next();
    }
    lines
        .filter(|line| !line.starts_with('\t') && !line.starts_with('#'))
        // morphological fields follow the entry after whitespace
        .filter_map(|line| line.split_whitespace().next())
        .map(|entry| entry.split_once('/').unwrap_or((entry, "")))
}

impl HunspellSpeller {
    pub fn from_words<I, S>(language: &str, words: I, max_edit_distance: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = HashSet::new();
        let mut tree = BKTree::new(metrics::Levenshtein);
        for word in words {
            let word: String = word.into();
            if set.insert(word.clone()) {
                tree.add(word);
            }
        }
        Self {
            language: language.to_string(),
            words: set,
            tree,
            max_edit_distance,
        }
    }

    /// Load `<name>.dic` and, when present next to it, `<name>.aff`.
    /// Without an affix file the flags are ignored and only the stems are known.
    pub fn load(language: &str, dic_path: &Path, max_edit_distance: u32) -> Result<Self, BackendError> {
        let dic = fs::read_to_string(dic_path)?;
        let aff_path = dic_path.with_extension("aff");
        let rules = if aff_path.is_file() {
            AffixRules::parse(&fs::read_to_string(&aff_path)?)?
        } else {
            debug!(path = %aff_path.display(), "no affix file, using bare stems");
            AffixRules::default()
        };
        let forms = dic_entries(&dic).flat_map(|(stem, flags)| rules.expand(stem, &rules.dic_flags(flags)));
        let speller = Self::from_words(language, forms, max_edit_distance);
        debug!(language, forms = speller.len(), "speller dictionary loaded");
        Ok(speller)
    }

    /// Known as-is, or known in lowercase when written capitalized.
    pub fn check(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }

    /// Known words within the edit-distance limit, nearest first; ties are
    /// broken lexicographically.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let query = word.to_string();
        let mut matches: Vec<(u32, &String)> = self.tree.find(&query, self.max_edit_distance).collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        matches.into_iter().map(|(_, w)| w.clone()).collect()
    }

    pub fn correct(&self, word: &str) -> String {
        if word.is_empty() || self.check(word) {
            return word.to_string();
        }
        self.suggest(word)
            .into_iter()
            .next()
            .unwrap_or_else(|| word.to_string())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Engine for HunspellSpeller {
    const NAME: &'static str = "speller";

    type Options = SpellerOptions;

    fn open(language: &str, options: &SpellerOptions) -> Result<Self, BackendError> {
        let mut searched = Vec::new();
        for dir in &options.dict_dirs {
            for name in candidate_names(language) {
                let path = dir.join(format!("{name}.dic"));
                if path.is_file() {
                    return Self::load(language, &path, options.max_edit_distance);
                }
                searched.push(path);
            }
        }
        Err(BackendError::MissingWordList {
            language: language.to_string(),
            searched,
        })
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn run(&mut self, word: &str) -> String {
        self.correct(word)
    }
}

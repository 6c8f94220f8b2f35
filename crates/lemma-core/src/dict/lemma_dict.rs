use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, debug_span};

use super::DictError;
use crate::tagset::PosMapper;

/// Immutable `(word, pos) → lemma` map.
///
/// Keys are stored case-normalized: lowercase word, uppercase tag (after
/// optional tagset mapping). Lemmas keep their case. `lookup` expects a
/// normalized query; `Lemmatizer` takes care of that.
#[derive(Debug, Default)]
pub struct LemmaDictionary {
    entries: HashMap<String, HashMap<String, String>>,
    len: usize,
}

impl LemmaDictionary {
    /// Load a dictionary file.
    ///
    /// With a `mapper`, raw tags are translated into the Universal Tagset;
    /// a tag missing from the mapping is keyed under the empty string.
    pub fn load(path: &Path, mapper: Option<&PosMapper>) -> Result<Self, DictError> {
        let _span = debug_span!("dict_load", path = %path.display()).entered();
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), mapper)
    }

    pub fn from_reader(reader: impl BufRead, mapper: Option<&PosMapper>) -> Result<Self, DictError> {
        let mut dict = Self::default();
        let mut unmapped = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split(' ');
            let (Some(word), Some(lemma), Some(raw_pos)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(DictError::Parse {
                    line: idx + 1,
                    content: line,
                });
            };

            let pos = match mapper {
                Some(mapper) => mapper
                    .map(raw_pos)
                    .or_else(|| mapper.map(&raw_pos.to_uppercase()))
                    .unwrap_or_else(|| {
                        unmapped += 1;
                        ""
                    }),
                None => raw_pos,
            };
            dict.insert(word, pos, lemma);
        }

        debug!(entries = dict.len, unmapped, "dictionary loaded");
        Ok(dict)
    }

    /// Build from `(word, pos, lemma)` triples; last write wins.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let mut dict = Self::default();
        for (word, pos, lemma) in entries {
            dict.insert(word, pos, lemma);
        }
        dict
    }

    fn insert(&mut self, word: &str, pos: &str, lemma: &str) {
        let by_pos = self.entries.entry(word.to_lowercase()).or_default();
        if by_pos.insert(pos.to_uppercase(), lemma.to_string()).is_none() {
            self.len += 1;
        }
    }

    pub fn lookup(&self, word: &str, pos: &str) -> Option<&str> {
        self.entries
            .get(word)
            .and_then(|by_pos| by_pos.get(pos))
            .map(String::as_str)
    }

    /// Number of distinct `(word, pos)` keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

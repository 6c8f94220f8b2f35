//! Batch lemmatization: `word<TAB>pos` lines in, JSON lines out.

use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::debug;

use lemma_core::{LemmaError, Lemmatizer};

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub word: String,
    pub pos: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub found: usize,
    pub fallback: usize,
    pub missing: usize,
}

/// Split an input line into word and tag. Tabs take precedence so that tags
/// may contain spaces; a line without a tag gets an empty one.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }
    let (word, pos) = line
        .split_once('\t')
        .or_else(|| line.trim().split_once(' '))
        .unwrap_or((line, ""));
    Some((word.trim(), pos.trim()))
}

fn resolve(lemmatizer: &Lemmatizer, word: &str, pos: &str) -> Result<BatchRecord, LemmaError> {
    let record = |lemma, found, error| BatchRecord {
        word: word.to_string(),
        pos: pos.to_string(),
        lemma,
        found,
        error,
    };
    match lemmatizer.lemma(word, pos) {
        Ok(lemma) => Ok(record(Some(lemma.text), lemma.found, None)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => Ok(record(None, false, Some(e.to_string()))),
    }
}

/// Lemmatize every line of `input` with `threads` callers sharing
/// `lemmatizer`, writing records to `output` in input order.
pub fn run_batch(
    lemmatizer: &Lemmatizer,
    input: impl BufRead,
    mut output: impl Write,
    threads: NonZeroUsize,
) -> io::Result<BatchStats> {
    let lines: Vec<String> = input.lines().collect::<io::Result<_>>()?;
    let requests: Vec<(&str, &str)> = lines.iter().filter_map(|l| parse_line(l)).collect();
    let chunk_len = requests.len().div_ceil(threads.get()).max(1);
    debug!(requests = requests.len(), threads = threads.get(), "batch start");

    let results: Vec<Result<BatchRecord, LemmaError>> = thread::scope(|s| {
        let handles: Vec<_> = requests
            .chunks(chunk_len)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|(word, pos)| resolve(lemmatizer, word, pos))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(records) => records,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut stats = BatchStats::default();
    for result in results {
        let record = result.map_err(io::Error::other)?;
        stats.total += 1;
        match (&record.lemma, record.found) {
            (Some(_), true) => stats.found += 1,
            (Some(_), false) => stats.fallback += 1,
            (None, _) => stats.missing += 1,
        }
        serde_json::to_writer(&mut output, &record)?;
        writeln!(output)?;
    }
    output.flush()?;
    Ok(stats)
}

//! Lemma dictionary storage.
//!
//! `LemmaDictionary` holds `(word, pos) → lemma` entries loaded from a plain
//! text file, one `inflected lemma POS` triple per line. `install` places the
//! bundled dictionaries into the per-user home when callers pass a relative
//! path.

pub mod install;
mod lemma_dict;

pub use install::{install_dicts, resolve_dict_path, InstallOptions};
pub use lemma_dict::LemmaDictionary;

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error at line {line}: {content:?}")]
    Parse { line: usize, content: String },

    #[error("cannot determine the home directory for dictionary installation")]
    NoHomeDir,

    #[error("bundled dictionaries not found at {}", .0.display())]
    MissingBundle(PathBuf),
}

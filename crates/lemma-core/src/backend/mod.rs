//! Fallback backends: a Snowball stemmer and a Hunspell spell checker.
//!
//! Engines are treated as non-reentrant. They only ever run inside a
//! `BackendPool` worker, which owns one engine and reopens it when a request
//! names a different language.

mod affix;
mod speller;
mod stemmer;

pub use speller::{HunspellSpeller, SpellerOptions};
pub use stemmer::SnowballStemmer;

use std::io;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use tracing::debug;

use crate::pool::{BackendPool, PoolError};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("no word list for `{language}` in {searched:?}")]
    MissingWordList {
        language: String,
        searched: Vec<PathBuf>,
    },

    #[error("affix file line {line}: {reason}")]
    Affix { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// One unit of fallback work.
#[derive(Debug, Clone)]
pub struct FallbackRequest {
    pub language: String,
    pub word: String,
}

pub trait Engine: Send + Sized + 'static {
    /// Thread-name prefix of the pool workers.
    const NAME: &'static str;

    type Options: Clone + Send + 'static;

    fn open(language: &str, options: &Self::Options) -> Result<Self, BackendError>;

    fn language(&self) -> &str;

    fn run(&mut self, word: &str) -> String;
}

/// The engine owned by one worker, reopened on a language change.
struct EngineSlot<E: Engine> {
    options: E::Options,
    engine: Option<E>,
}

impl<E: Engine> EngineSlot<E> {
    fn acquire(&mut self, language: &str) -> Result<&mut E, BackendError> {
        let engine = match self.engine.take() {
            Some(engine) if engine.language() == language => engine,
            _ => E::open(language, &self.options)?,
        };
        Ok(self.engine.insert(engine))
    }

    fn handle(&mut self, request: FallbackRequest) -> Result<String, BackendError> {
        let engine = self.acquire(&request.language)?;
        Ok(engine.run(&request.word))
    }
}

/// A pool of engines of one kind, e.g. `Fallback<SnowballStemmer>`.
pub struct Fallback<E: Engine> {
    pool: BackendPool<FallbackRequest, Result<String, BackendError>>,
    _engine: PhantomData<fn() -> E>,
}

pub type Stemmer = Fallback<SnowballStemmer>;
pub type Speller = Fallback<HunspellSpeller>;

impl<E: Engine> Fallback<E> {
    /// Open one engine for `language` up front so that a bad configuration
    /// fails here rather than on the first call, then start the pool.
    pub fn start(
        language: &str,
        options: E::Options,
        size: NonZeroUsize,
    ) -> Result<Self, BackendError> {
        let mut opened = Some(E::open(language, &options)?);
        let pool = BackendPool::new(E::NAME, size, |_| {
            let mut slot = EngineSlot::<E> {
                options: options.clone(),
                engine: opened.take(),
            };
            move |request: FallbackRequest| slot.handle(request)
        })?;
        debug!(backend = E::NAME, language, "fallback backend ready");
        Ok(Self {
            pool,
            _engine: PhantomData,
        })
    }

    pub fn process(&self, language: &str, word: &str) -> Result<String, BackendError> {
        self.pool.process(FallbackRequest {
            language: language.to_string(),
            word: word.to_string(),
        })?
    }

    pub fn size(&self) -> usize {
        self.pool.size()
    }

    pub fn close(&mut self) {
        self.pool.close();
    }
}

impl Fallback<SnowballStemmer> {
    pub fn stem(&self, language: &str, word: &str) -> Result<String, BackendError> {
        self.process(language, word)
    }
}

impl Fallback<HunspellSpeller> {
    /// The word itself when it is spelled correctly or nothing better is
    /// known, otherwise the first suggestion.
    pub fn correct(&self, language: &str, word: &str) -> Result<String, BackendError> {
        self.process(language, word)
    }
}

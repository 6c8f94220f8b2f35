pub mod backend;
pub mod dict;
pub mod lang;
pub mod lemmatizer;
pub mod pool;
pub mod settings;
pub mod tagset;

pub use lemmatizer::{BuildOptions, ConfigError, Lemma, LemmaError, Lemmatizer};
pub use tagset::map_pos;

use rust_stemmers::{Algorithm, Stemmer};

use super::{BackendError, Engine};

/// Snowball stemmer, addressed by lowercase English language name.
pub struct SnowballStemmer {
    language: String,
    stemmer: Stemmer,
}

fn algorithm(language: &str) -> Option<Algorithm> {
    let algorithm = match language {
        "arabic" => Algorithm::Arabic,
        "danish" => Algorithm::Danish,
        "dutch" => Algorithm::Dutch,
        "english" => Algorithm::English,
        "finnish" => Algorithm::Finnish,
        "french" => Algorithm::French,
        "german" => Algorithm::German,
        "greek" | "modern greek" => Algorithm::Greek,
        "hungarian" => Algorithm::Hungarian,
        "italian" => Algorithm::Italian,
        "norwegian" | "norwegian bokmål" => Algorithm::Norwegian,
        "portuguese" => Algorithm::Portuguese,
        "romanian" => Algorithm::Romanian,
        "russian" => Algorithm::Russian,
        "spanish" => Algorithm::Spanish,
        "swedish" => Algorithm::Swedish,
        "tamil" => Algorithm::Tamil,
        "turkish" => Algorithm::Turkish,
        _ => return None,
    };
    Some(algorithm)
}

impl Engine for SnowballStemmer {
    const NAME: &'static str = "stemmer";

    type Options = ();

    fn open(language: &str, _options: &()) -> Result<Self, BackendError> {
        let algorithm = algorithm(language)
            .ok_or_else(|| BackendError::UnsupportedLanguage(language.to_string()))?;
        Ok(Self {
            language: language.to_string(),
            stemmer: Stemmer::create(algorithm),
        })
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn run(&mut self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }
}

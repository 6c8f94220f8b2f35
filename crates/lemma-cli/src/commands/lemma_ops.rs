use std::env;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::num::NonZeroUsize;
use std::process;

use tracing::info;

use lemma_core::dict::install::DEBUG_ENV;
use lemma_core::dict::{install_dicts, InstallOptions};
use lemma_core::settings::LemmatizerConfig;
use lemma_core::Lemmatizer;

use crate::args::LemmatizerArgs;
use crate::batch::run_batch;
use crate::die;

fn open(args: &LemmatizerArgs) -> Lemmatizer {
    let config = die!(args.to_config(), "Error: {}");
    if env::var_os(DEBUG_ENV).is_some() {
        if let Some(notice) = dictionary_notice(&config) {
            eprintln!("{notice}");
        }
    }
    die!(Lemmatizer::from_config(&config), "Error: {}")
}

/// Where a relative dictionary path resolves to; `None` for absolute paths.
/// Printed under `DEBUG` so the location shows without the `trace` feature.
pub fn dictionary_notice(config: &LemmatizerConfig) -> Option<String> {
    let path = &config.dictionary.path;
    if path.is_absolute() {
        return None;
    }
    let opts = InstallOptions {
        home: config.dictionary.home.clone(),
        bundled: None,
    };
    let home = opts.resolve_home().ok()?;
    Some(format!(
        "default dictionaries are installed to: {}; loading {}",
        home.display(),
        home.join(path).display()
    ))
}

pub fn lemma(args: &LemmatizerArgs, word: &str, pos: &str, json: bool) {
    let lemmatizer = open(args);
    match lemmatizer.lemma(word, pos) {
        Ok(lemma) if json => println!(
            "{}",
            serde_json::json!({ "word": word, "pos": pos, "lemma": lemma.text, "found": lemma.found })
        ),
        Ok(lemma) => {
            let source = if lemma.found { "dictionary" } else { "fallback" };
            println!("{}\t{source}", lemma.text);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

pub fn stem(args: &LemmatizerArgs, words: &[String]) {
    let mut args = args.clone();
    args.stem = true;
    let lemmatizer = open(&args);
    for word in words {
        let stem = die!(lemmatizer.stem(word), "Error: {}");
        println!("{word}\t{stem}");
    }
}

pub fn batch(args: &LemmatizerArgs, input: Option<&str>, output: Option<&str>, threads: Option<usize>) {
    let lemmatizer = open(args);
    let threads = threads
        .and_then(NonZeroUsize::new)
        .unwrap_or_else(|| NonZeroUsize::new(lemmatizer.workers()).unwrap_or(NonZeroUsize::MIN));

    let reader: Box<dyn io::BufRead> = match input {
        Some(path) => Box::new(BufReader::new(die!(
            fs::File::open(path),
            "Error opening {path}: {}"
        ))),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn io::Write> = match output {
        Some(path) => Box::new(BufWriter::new(die!(
            fs::File::create(path),
            "Error creating {path}: {}"
        ))),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stats = die!(run_batch(&lemmatizer, reader, writer, threads), "Error: {}");
    info!(?stats, "batch done");
    eprintln!(
        "{} words: {} found, {} fallback, {} missing",
        stats.total, stats.found, stats.fallback, stats.missing
    );
}

pub fn install(home: Option<&str>, bundled: Option<&str>) {
    let opts = InstallOptions {
        home: home.map(Into::into),
        bundled: bundled.map(Into::into),
    };
    let home = die!(install_dicts(&opts), "Error installing dictionaries: {}");
    if env::var_os(DEBUG_ENV).is_some() {
        eprintln!("default dictionaries are installed to: {}", home.display());
    }
    println!("{}", home.display());
}

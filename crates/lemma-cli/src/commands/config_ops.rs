use std::fs;

use lemma_core::settings;
use lemma_core::tagset::TagsetRegistry;

use crate::die;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let c = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: dictionary.path={}, tagset={:?}, stemmer={}, speller={}, concurrent={}",
        c.dictionary.path.display(),
        c.dictionary.tagset,
        c.stemmer.enabled,
        c.speller.enabled,
        c.concurrent
    );
}

pub fn tagsets() {
    for key in TagsetRegistry::builtin().names() {
        println!("{key}");
    }
}

pub fn map_pos(tagset: &str, lang: &str, tags: &[String]) {
    let mapper = die!(
        TagsetRegistry::builtin().mapper(tagset, lang),
        "Error: {}"
    );
    if tags.is_empty() {
        eprintln!("{}: {} tags", mapper.key(), mapper.len());
        return;
    }
    for tag in tags {
        match mapper.map(tag) {
            Some(universal) => println!("{tag}\t{universal}"),
            None => println!("{tag}\t-"),
        }
    }
}

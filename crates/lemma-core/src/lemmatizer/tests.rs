use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::thread;

use proptest::prelude::*;

use super::*;
use crate::pool::PoolError;
use crate::tagset::map_pos;

fn testdata() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn options(tagset: &str, stemmer: bool, speller: bool, concurrent: bool) -> BuildOptions {
    BuildOptions {
        dict_path: testdata().join("en.lmm"),
        stemmer_fallback: stemmer,
        stemmer_language: "english".to_string(),
        speller_fallback: speller,
        speller_language: "en-US".to_string(),
        speller: SpellerOptions {
            dict_dirs: vec![testdata()],
            max_edit_distance: 2,
        },
        tagset: tagset.to_string(),
        tagset_language: "en".to_string(),
        concurrent,
        install: InstallOptions::default(),
    }
}

fn build(tagset: &str, stemmer: bool, speller: bool) -> Lemmatizer {
    Lemmatizer::build(options(tagset, stemmer, speller, false)).unwrap()
}

fn plain() -> &'static Lemmatizer {
    static INSTANCE: OnceLock<Lemmatizer> = OnceLock::new();
    INSTANCE.get_or_init(|| build("", false, false))
}

fn found(text: &str) -> Lemma {
    Lemma {
        text: text.to_string(),
        found: true,
    }
}

fn fallback(text: &str) -> Lemma {
    Lemma {
        text: text.to_string(),
        found: false,
    }
}

#[test]
fn dictionary_lemmas() {
    let l = plain();
    for (word, pos, lemma) in [
        ("am", "vbp", "be"),
        ("Are", "vbp", "be"),
        ("caresses", "NNS", "caress"),
        ("operational", "JJ", "operational"),
        ("marketing", "nn", "marketing"),
        ("abandoning", "VBG", "abandon"),
        ("abracadabra", "NN", "abracadabra"),
    ] {
        assert_eq!(l.lemma(word, pos).unwrap(), found(lemma), "lemma of {word}/{pos}");
    }
}

#[test]
fn pos_disambiguates() {
    let l = plain();
    assert_eq!(l.lemma("i'dn't've", "PRP+MD+RB+VBP").unwrap(), found("i+would+not+have"));
    assert_eq!(l.lemma("stranger", "NN").unwrap(), found("stranger"));
    assert_eq!(l.lemma("stranger", "JJR").unwrap(), found("strange"));
}

#[test]
fn miss_without_fallbacks() {
    let err = plain().lemma("quadrillion", "NN").unwrap_err();
    assert!(matches!(&err, LemmaError::NotFound { word } if word == "quadrillion"));
    assert!(!err.is_fatal());
    assert_eq!(err.to_string(), "lemma for `quadrillion` was not found");
}

#[test]
fn miss_reports_lowercased_word() {
    let err = plain().lemma("Quadrillion", "NN").unwrap_err();
    assert!(matches!(err, LemmaError::NotFound { word } if word == "quadrillion"));
}

#[test]
fn case_insensitive_pair() {
    let l = plain();
    assert_eq!(l.lemma("Are", "VBP").unwrap(), l.lemma("are", "vbp").unwrap());
}

#[test]
fn freeling_tagset_lemmas() {
    let l = build("freeling", false, false);
    assert_eq!(l.lemma("i'dn't've", "PRON").unwrap(), found("i+would+not+have"));
    assert_eq!(l.lemma("stranger", "NOUN").unwrap(), found("stranger"));
    assert_eq!(l.lemma("stranger", "ADJ").unwrap(), found("strange"));
    assert!(matches!(
        l.lemma("quadrillion", "NOUN"),
        Err(LemmaError::NotFound { .. })
    ));
    // raw tags are gone once a tagset is applied
    assert!(l.lemma("stranger", "JJR").is_err());
}

#[test]
fn unmapped_tag_is_keyed_empty() {
    // CD has no FreeLing mapping in the table
    let l = build("freeling", false, false);
    assert!(l.lemma("1990", "NUM").is_err());
    assert_eq!(l.lemma("1990", "").unwrap(), found("1990"));

    let l = build("penn", false, false);
    assert_eq!(l.lemma("1990", "NUM").unwrap(), found("1990"));
}

#[test]
fn caller_side_tag_mapping() {
    let l = build("freeling", true, true);
    let wordnet = map_pos("wordnet", "en-GB").unwrap();
    let noun = wordnet.map("n").unwrap();
    let verb = wordnet.map("v").unwrap();
    assert_eq!(l.lemma("words", noun).unwrap(), found("word"));
    assert_eq!(l.lemma("running", verb).unwrap(), found("run"));
}

#[test]
fn stemming_fallback() {
    let l = build("freeling", true, false);
    assert_eq!(l.lemma("teenager", "NONSENSE").unwrap(), fallback("teenag"));
    assert_eq!(l.lemma("bubbling", "NONSENSE").unwrap(), fallback("bubbl"));
    assert_eq!(l.lemma("loving", "NONSENSE").unwrap(), fallback("love"));
    assert_eq!(l.lemma("ababagalamaga", "NOUN").unwrap(), fallback("ababagalamaga"));
}

#[test]
fn stemming_then_spelling_fallback() {
    let l = build("freeling", true, true);
    // the corrected stem is "teenage", an adjective, whatever the tag said
    assert_eq!(l.lemma("teenager", "NONSENSE").unwrap(), fallback("teenage"));
    assert_eq!(l.lemma("bubbling", "NONSENSE").unwrap(), fallback("bubble"));
    assert_eq!(l.lemma("loving", "NONSENSE").unwrap(), fallback("love"));
}

#[test]
fn dictionary_hit_beats_fallbacks() {
    for l in [build("", true, false), build("", true, true), build("", false, true)] {
        assert_eq!(l.lemma("teenagers", "NNS").unwrap(), found("teenager"));
        assert_eq!(l.lemma("caresses", "NNS").unwrap(), found("caress"));
        assert_eq!(l.lemma("went", "VBD").unwrap(), found("go"));
    }
}

#[test]
fn speller_only_corrects_before_lookup() {
    let l = build("freeling", false, true);
    assert_eq!(l.lemma("teeenager", "NOUN").unwrap(), found("teenager"));
    assert_eq!(l.lemma("bubling", "VERB").unwrap(), found("bubble"));
    assert_eq!(l.lemma("lovinh", "VERB").unwrap(), found("love"));
    assert_eq!(l.lemma("loveing", "VERB").unwrap(), found("love"));
    assert_eq!(l.lemma("typo", "NOUN").unwrap(), found("typo"));

    // corrected, but the correction is not in the dictionary either
    let err = l.lemma("juse", "NOUN").unwrap_err();
    assert!(matches!(err, LemmaError::NotFound { word } if word == "just"));
}

#[test]
fn speller_only_keeps_inflected_forms() {
    // the word list holds stems and affix flags only
    let l = build("", false, true);
    for (word, pos, lemma) in [
        ("caresses", "NNS", "caress"),
        ("words", "NNS", "word"),
        ("loves", "VBZ", "love"),
        ("bubbling", "VBG", "bubble"),
        ("abandoning", "VBG", "abandon"),
        ("weirdest", "JJS", "weird"),
        ("laboratories", "NNS", "laboratory"),
    ] {
        assert_eq!(l.lemma(word, pos).unwrap(), found(lemma), "lemma of {word}/{pos}");
    }
}

#[test]
fn stem_entry_point() {
    let stem_only = build("", true, false);
    let stem_spell = build("", true, true);
    for (word, stem, spelled) in [
        ("laboratory", "laboratori", "laboratory"),
        ("teenager", "teenag", "teenage"),
        ("ababagalamaga", "ababagalamaga", "ababagalamaga"),
    ] {
        assert_eq!(stem_only.stem(word).unwrap(), stem);
        assert_eq!(stem_spell.stem(word).unwrap(), spelled);
    }
    // the dictionary is bypassed: "laboratories" has an entry
    assert_eq!(stem_only.stem("laboratories").unwrap(), "laboratori");
}

#[test]
fn stem_without_stemmer() {
    let err = plain().stem("teenager").unwrap_err();
    assert!(matches!(err, LemmaError::StemmerDisabled));
}

#[test]
fn idempotent_calls() {
    let l = build("freeling", true, true);
    let first = l.lemma("abracadabrated", "ADJ").unwrap();
    for _ in 0..5 {
        assert_eq!(l.lemma("abracadabrated", "ADJ").unwrap(), first);
    }
}

#[test]
fn pools_only_for_enabled_fallbacks() {
    let l = plain();
    assert!(!l.has_stemmer());
    assert!(!l.has_speller());
    assert_eq!(l.workers(), 0);

    let l = build("", true, false);
    assert!(l.has_stemmer());
    assert!(!l.has_speller());
    assert_eq!(l.workers(), 1);

    let l = Lemmatizer::build(options("", false, true, true)).unwrap();
    assert!(l.has_speller());
    assert_eq!(l.workers(), pool_size(true).get());
}

#[test]
fn concurrent_matches_sequential() {
    let words = generated_words(300);
    let sequential = build("freeling", true, true);
    let expected: Vec<String> = words
        .iter()
        .map(|w| sequential.lemma(w, "NOUN").unwrap().text)
        .collect();

    let shared = Arc::new(Lemmatizer::build(options("freeling", true, true, true)).unwrap());
    let handles: Vec<_> = words
        .chunks(25)
        .map(|chunk| {
            let shared = Arc::clone(&shared);
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                chunk
                    .iter()
                    .map(|w| shared.lemma(w, "NOUN").unwrap().text)
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    let actual: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(actual, expected);
    assert_eq!(actual[42], "concurrency");
}

/// Deterministic pseudo-random lowercase words; index 42 is a dictionary word.
fn generated_words(n: usize) -> Vec<String> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut words: Vec<String> = (0..n)
        .map(|_| {
            let len = 3 + (next() % 8) as usize;
            (0..len).map(|_| (b'a' + (next() % 26) as u8) as char).collect()
        })
        .collect();
    words[42] = "concurrency".to_string();
    words
}

#[test]
fn close_releases_pools() {
    let mut l = build("", true, true);
    l.close();
    assert_eq!(l.workers(), 0);
    // dictionary hits need no backend
    assert_eq!(l.lemma("went", "VBD").unwrap(), found("go"));
    let err = l.lemma("teenager", "NONSENSE").unwrap_err();
    assert!(matches!(err, LemmaError::Backend(BackendError::Pool(PoolError::Closed))));
    // closing twice is fine
    l.close();
}

#[test]
fn wrong_tagset_is_fatal() {
    let err = Lemmatizer::build(options("wrong", false, false, false)).err().unwrap();
    assert!(err.is_fatal());
    assert!(matches!(err, LemmaError::Config(ConfigError::Tagset(_))));
}

#[test]
fn wrong_tagset_language_is_fatal() {
    let mut opts = options("freeling", false, false, false);
    opts.tagset_language = "pt-BR".to_string();
    let err = Lemmatizer::build(opts).err().unwrap();
    assert!(matches!(
        err,
        LemmaError::Config(ConfigError::Tagset(TagsetError::UnknownTagset { ref key })) if key == "freeling_pt"
    ));
}

#[test]
fn wrong_stemmer_language_is_fatal() {
    let mut opts = options("", true, false, false);
    opts.stemmer_language = "tokipona".to_string();
    let err = Lemmatizer::build(opts).err().unwrap();
    assert!(err.is_fatal());
    assert!(matches!(
        err,
        LemmaError::Config(ConfigError::Backend { backend: "stemmer", .. })
    ));
}

#[test]
fn missing_word_list_is_fatal() {
    let mut opts = options("", false, true, false);
    opts.speller_language = "uk-UA".to_string();
    let err = Lemmatizer::build(opts).err().unwrap();
    assert!(matches!(
        err,
        LemmaError::Config(ConfigError::Backend {
            backend: "speller",
            source: BackendError::MissingWordList { .. }
        })
    ));
}

#[test]
fn missing_absolute_dictionary_is_recoverable() {
    let mut opts = options("", false, false, false);
    opts.dict_path = testdata().join("nope.lmm");
    let err = Lemmatizer::build(opts).err().unwrap();
    assert!(!err.is_fatal());
    assert!(matches!(err, LemmaError::Dict(DictError::Io(_))));
}

#[test]
fn relative_dictionary_installs_into_home() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = options("penn", false, false, false);
    opts.dict_path = PathBuf::from("en.lmm");
    opts.install = InstallOptions {
        home: Some(tmp.path().join("home")),
        bundled: Some(testdata()),
    };
    let l = Lemmatizer::build(opts.clone()).unwrap();
    assert_eq!(l.lemma("caresses", "NOUN").unwrap(), found("caress"));

    opts.dict_path = PathBuf::from("uk.lmm");
    let err = Lemmatizer::build(opts).err().unwrap();
    assert!(matches!(err, LemmaError::Dict(DictError::Io(_))));
}

#[test]
fn new_derives_languages() {
    let path = testdata().join("en.lmm");
    let l = Lemmatizer::new(&path, "en-US", "penn", true, false, false).unwrap();
    assert_eq!(l.lemma("caresses", "NOUN").unwrap(), found("caress"));
    assert_eq!(l.stem("teenager").unwrap(), "teenag");

    // no language needed without a tagset or fallbacks
    let l = Lemmatizer::new(&path, "", "", false, false, false).unwrap();
    assert_eq!(l.lemma("stranger", "JJR").unwrap(), found("strange"));
}

#[test]
fn new_rejects_bad_language_tag() {
    let path = testdata().join("en.lmm");
    let err = Lemmatizer::new(&path, "1x", "penn", false, false, false).err().unwrap();
    assert!(matches!(err, LemmaError::Config(ConfigError::Language(_))));

    let err = Lemmatizer::new(&path, "pt-BR", "freeling", false, false, false).err().unwrap();
    assert!(err.is_fatal());
}

#[test]
fn from_config_file() {
    let toml = format!(
        r#"
[dictionary]
path = '{}'
tagset = "freeling"
tagset_language = "en-GB"

[stemmer]
enabled = true
language = "english"

[speller]
enabled = true
language = "en-US"
max_edit_distance = 2
dict_dirs = ['{}']
"#,
        testdata().join("en.lmm").display(),
        testdata().display()
    );
    let config = crate::settings::parse_settings_toml(&toml).unwrap();
    let l = Lemmatizer::from_config(&config).unwrap();
    assert_eq!(l.lemma("teenager", "NONSENSE").unwrap(), fallback("teenage"));
    assert_eq!(l.lemma("stranger", "ADJ").unwrap(), found("strange"));
}

#[test]
fn lemmatizer_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Lemmatizer>();
}

const HITS: &[(&str, &str, &str)] = &[
    ("are", "vbp", "be"),
    ("caresses", "nns", "caress"),
    ("stranger", "jjr", "strange"),
    ("abandoning", "vbg", "abandon"),
    ("geese", "nns", "goose"),
];

fn recase(s: &str, mask: u32) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask >> (i % 32) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn lookup_ignores_case(idx in 0..HITS.len(), word_mask in any::<u32>(), pos_mask in any::<u32>()) {
        let (word, pos, lemma) = HITS[idx];
        let got = plain().lemma(&recase(word, word_mask), &recase(pos, pos_mask)).unwrap();
        prop_assert_eq!(got, found(lemma));
    }
}

use clap::{Parser, Subcommand};

use lemma_cli::args::LemmatizerArgs;
use lemma_cli::commands::{config_ops, lemma_ops};
use lemma_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "lemtool",
    about = "Dictionary lemmatizer with stemming and spelling fallbacks",
    after_help = "Set DEBUG to print where the bundled dictionaries are installed."
)]
struct Cli {
    /// Debug logging (needs the `trace` feature)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lemmatize a single word
    Lemma {
        word: String,
        /// Part-of-speech tag, in the dictionary's tagset or the Universal one
        pos: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        lemmatizer: LemmatizerArgs,
    },
    /// Stem words, bypassing the dictionary (the stemmer is always enabled)
    Stem {
        #[arg(required = true)]
        words: Vec<String>,
        #[command(flatten)]
        lemmatizer: LemmatizerArgs,
    },
    /// Lemmatize `word<TAB>pos` lines and write JSON lines
    Batch {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Caller threads (default: one per backend worker)
        #[arg(short, long)]
        threads: Option<usize>,
        #[command(flatten)]
        lemmatizer: LemmatizerArgs,
    },
    /// List the available tagset mappings
    Tagsets,
    /// Map tags onto the Universal Tagset
    MapPos {
        /// Tagset name (penn, freeling, wordnet)
        tagset: String,
        /// Language tag, e.g. en-US
        lang: String,
        /// Tags to map; prints the table size when omitted
        tags: Vec<String>,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        file: String,
    },
    /// Install the bundled dictionaries into the dictionary home
    Install {
        /// Dictionary home (default: ~/.lemma-engine)
        #[arg(long)]
        home: Option<String>,
        /// Bundled dictionary directory (default: $LEMMA_DICTS or ./dicts)
        #[arg(long)]
        bundled: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Lemma {
            word,
            pos,
            json,
            lemmatizer,
        } => lemma_ops::lemma(&lemmatizer, &word, &pos, json),
        Command::Stem { words, lemmatizer } => lemma_ops::stem(&lemmatizer, &words),
        Command::Batch {
            input,
            output,
            threads,
            lemmatizer,
        } => lemma_ops::batch(&lemmatizer, input.as_deref(), output.as_deref(), threads),
        Command::Tagsets => config_ops::tagsets(),
        Command::MapPos { tagset, lang, tags } => config_ops::map_pos(&tagset, &lang, &tags),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::Install { home, bundled } => lemma_ops::install(home.as_deref(), bundled.as_deref()),
    }
}

//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: List strings found in source files, or build a catalog from them
//! - `update`: Merge a freshly extracted catalog into a translated one
//! - `translate`: Machine-translate the untranslated phrases of a catalog
//! - `list`: Show catalog records that need attention or are done
//! - `trim`: Write the runtime-only projection of a catalog
//! - `convert`: Rewrite a legacy keyed catalog as a record list
//! - `lookup`: Resolve a phrase the way an application would at run time
//! - `init`: Initialize a phrasectl configuration file

use std::path::PathBuf;

use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::custom_pattern::CustomPattern;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One string per line
    #[default]
    Plain,
    /// Visual Studio diagnostic style: `file(line): string`
    Vs,
    /// A catalog in record-list form
    Json,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .multiple(true)
        .args(["translatable", "non_translatable", "patterns"])
))]
pub struct ExtractCommand {
    /// Directory, file or glob pattern to scan
    pub path: String,

    /// Extract strings passed to the translation call, e.g. "Open".T()
    #[arg(short, long)]
    pub translatable: bool,

    /// Extract all other strings
    #[arg(short, long)]
    pub non_translatable: bool,

    /// Extract matches of a regular expression; `\C` matches a string literal
    /// and the first capture group, if any, is the extracted text
    #[arg(long = "regex", value_name = "REGEX")]
    pub patterns: Vec<CustomPattern>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Include source locations in JSON output
    #[arg(long)]
    pub locations: bool,

    /// Print each file name before its strings
    #[arg(long)]
    pub file_header: bool,

    /// Print strings without escaping
    #[arg(long)]
    pub raw: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Freshly extracted catalog
    pub source: PathBuf,

    /// Translated catalog to update (created if missing)
    pub target: PathBuf,

    /// Don't copy source locations into the target
    #[arg(long)]
    pub no_locations: bool,

    /// Keep target records that are no longer in the source
    #[arg(long)]
    pub no_trim: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Catalog to translate in place
    pub file: PathBuf,

    /// Target language code (default: taken from a file name like strings-fr.json)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Translation service API key
    #[arg(long, env = "PHRASECTL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Also replace existing machine translations
    #[arg(long)]
    pub redo: bool,

    /// Replace every translation, including reviewed ones
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("status")
        .required(true)
        .multiple(true)
        .args(["todo", "done"])
))]
pub struct ListCommand {
    /// Catalog to list
    pub file: PathBuf,

    /// List untranslated and machine translated records
    #[arg(long)]
    pub todo: bool,

    /// List reviewed records
    #[arg(long)]
    pub done: bool,
}

#[derive(Debug, Args)]
pub struct TrimCommand {
    /// Catalog to read
    pub source: PathBuf,

    /// Runtime catalog to write
    pub target: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Legacy catalog to read
    pub source: PathBuf,

    /// Record-list catalog to write
    pub target: PathBuf,
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Catalog to read
    pub file: PathBuf,

    /// Phrase to translate
    pub phrase: String,

    /// Context of the phrase
    #[arg(short, long)]
    pub context: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract strings from source files
    Extract(ExtractCommand),
    /// Merge an extracted catalog into a translated catalog
    Update(UpdateCommand),
    /// Machine-translate untranslated phrases
    Translate(TranslateCommand),
    /// List records that need attention or are done
    List(ListCommand),
    /// Write a catalog with only what is needed at run time
    Trim(TrimCommand),
    /// Convert a legacy keyed catalog to a record list
    Convert(ConvertCommand),
    /// Look up the translation of a phrase
    Lookup(LookupCommand),
    /// Initialize a new .phrasectlrc.json configuration file
    Init,
}

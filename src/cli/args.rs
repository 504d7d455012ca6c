//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::GroupBy;

/// Browse nested watch-history datasets: search, filter and group by country or genre
#[derive(Parser, Debug)]
#[command(name = "watchtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// JSON dataset to browse (overrides config)
    #[arg(short = 'f', long, global = true, env = "WATCHTREE_DATA_FILE", value_hint = ValueHint::FilePath)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the filtered view (tree, or user table while searching)
    View(ViewArgs),

    /// List all country names
    Countries,

    /// List all genre names
    Genres,

    /// Show dataset summary
    Info,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options of `watchtree view`.
///
/// `--country`, `--genre` and `--expand` toggle: naming a value twice (or
/// naming one preset in config) switches it off again.
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Top-level grouping (default from config)
    #[arg(short, long, value_enum)]
    pub group_by: Option<GroupByArg>,

    /// Case-insensitive search over names and emails
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Toggle a country filter
    #[arg(short = 'c', long = "country")]
    pub countries: Vec<String>,

    /// Toggle a genre filter
    #[arg(short = 'G', long = "genre")]
    pub genres: Vec<String>,

    /// Toggle expansion of a country, genre or user email
    #[arg(short, long = "expand")]
    pub expand: Vec<String>,

    /// Expand everything in the view
    #[arg(long)]
    pub expand_all: bool,

    /// Hide watch history under expanded users
    #[arg(long)]
    pub no_history: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupByArg {
    Country,
    Genre,
}

impl From<GroupByArg> for GroupBy {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Country => GroupBy::Country,
            GroupByArg::Genre => GroupBy::Genre,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

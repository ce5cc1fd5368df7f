//! CLI definitions for autocheck.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use autocheck_store::ListKind;

/// autocheck CLI.
#[derive(Debug, Parser)]
#[command(name = "autocheck")]
#[command(about = "Select the checkboxes of an HTML page whose surrounding text matches keywords")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (missing file means defaults)
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Keyword store file, overrides `store.path` from the configuration
    #[arg(short, long, env = "AUTOCHECK_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Scan a page and select matching checkboxes
    Scan {
        /// HTML file to scan, `-` for stdin
        input: PathBuf,

        /// Keyword to match; repeatable. Defaults to the stored lists
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// List every selected checkbox with its matched keywords
        #[arg(long)]
        show_matches: bool,
    },

    /// Keyword list management commands
    Keywords {
        #[command(subcommand)]
        action: KeywordsAction,
    },

    /// Show statistics of the last successful scan
    Stats,
}

#[derive(Debug, Subcommand)]
pub(crate) enum KeywordsAction {
    /// Print both keyword lists
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a list with the keywords of a file, one per line
    Set {
        list: ListArg,

        /// Keyword file, `-` for stdin
        input: PathBuf,
    },

    /// Append keywords to a list
    Add {
        list: ListArg,

        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Empty one list, or both when no list is given
    Clear { list: Option<ListArg> },
}

/// Keyword list name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ListArg {
    Packages,
    Vods,
}

impl From<ListArg> for ListKind {
    fn from(list: ListArg) -> Self {
        match list {
            ListArg::Packages => ListKind::Packages,
            ListArg::Vods => ListKind::Vods,
        }
    }
}

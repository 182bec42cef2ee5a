//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Etymon notes parser: turns category / root / word study notes into structured vocabulary data
#[derive(Parser, Debug)]
#[command(name = "etymon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .etymon.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse notes and write the JSON database
    Parse {
        /// Note file, directory of note files, or - for stdin
        #[arg(value_hint = ValueHint::AnyPath)]
        input: PathBuf,
        /// Output file (- for stdout; default from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Write single-line JSON
        #[arg(long)]
        compact: bool,
        /// Definition for entries without one
        #[arg(long)]
        placeholder: Option<String>,
        /// Ignore `Word (breakdown)：gloss` definitions
        #[arg(long)]
        no_trailing_gloss: bool,
        /// Fail when the input yields no categories
        #[arg(long)]
        strict: bool,
    },

    /// Count categories, root groups and words
    Stats {
        /// Note file, directory of note files, or - for stdin
        #[arg(value_hint = ValueHint::AnyPath)]
        input: PathBuf,
    },

    /// Print notes with full-width punctuation folded to ASCII
    Normalize {
        /// Note file or - for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Bulk file renamer with a preview-and-confirm step
#[derive(Parser, Debug)]
#[command(name = "rebatch")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Options shared by every rename mode
#[derive(Args, Debug, Clone)]
pub struct CommonOpts {
    /// Apply the plan without asking for confirmation
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Show the plan without renaming anything
    #[arg(long)]
    pub dry_run: bool,

    /// Preview format (default from config, falling back to list)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress the summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Append a timestamped line per rename to this file
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a prefix to every filename
    Prefix {
        /// Directory containing the files to rename
        directory: PathBuf,

        /// Prefix to add
        value: String,

        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Add a suffix to every filename, before the extension
    Suffix {
        /// Directory containing the files to rename
        directory: PathBuf,

        /// Suffix to add
        value: String,

        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Replace literal text in every filename
    Replace {
        /// Directory containing the files to rename
        directory: PathBuf,

        /// Text to replace (must not be empty)
        old: String,

        /// Replacement text
        new: String,

        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Replace regex matches in every filename
    Regex {
        /// Directory containing the files to rename
        directory: PathBuf,

        /// Regex pattern, e.g. 'IMG_(\d+)'
        pattern: String,

        /// Replacement, with $1-style backreferences
        replacement: String,

        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Rebuild filenames from a template
    ///
    /// The template interpolates {name}, {ext}, {index} and {counter};
    /// integer fields accept a zero-padded width, e.g. 'file_{counter:03d}{ext}'.
    Pattern {
        /// Directory containing the files to rename
        directory: PathBuf,

        /// Rename template, e.g. 'file_{counter:03d}{ext}'
        template: String,

        #[command(flatten)]
        opts: CommonOpts,
    },
}

impl Commands {
    pub fn opts(&self) -> &CommonOpts {
        match self {
            Self::Prefix { opts, .. }
            | Self::Suffix { opts, .. }
            | Self::Replace { opts, .. }
            | Self::Regex { opts, .. }
            | Self::Pattern { opts, .. } => opts,
        }
    }
}

use anyhow::Result;
use clap::Parser;
use rebatch_core::{Config, Error, RenameMode};
use std::io::{self, IsTerminal};
use std::process;

mod cli;
mod rename;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let use_color = !cli.no_color && io::stdout().is_terminal();

    // Load config to get defaults
    let config = Config::load().unwrap_or_default();

    match run(cli, &config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            let exit_code = match e.downcast_ref::<Error>() {
                Some(err) if err.is_invalid_input() => 2,
                _ => 1,
            };
            process::exit(exit_code);
        },
    }
}

fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let opts = cli.command.opts().clone();
    let (directory, mode) = match cli.command {
        Commands::Prefix {
            directory, value, ..
        } => (directory, RenameMode::prefix(value)),

        Commands::Suffix {
            directory, value, ..
        } => (directory, RenameMode::suffix(value)),

        Commands::Replace {
            directory, old, new, ..
        } => (directory, RenameMode::replace(old, new)?),

        Commands::Regex {
            directory,
            pattern,
            replacement,
            ..
        } => (directory, RenameMode::regex(&pattern, replacement)?),

        Commands::Pattern {
            directory, template, ..
        } => (directory, RenameMode::pattern(&template)?),
    };

    rename::handle_rename(&directory, &mode, &opts, config, use_color)
}

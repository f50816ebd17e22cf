use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, ValueEnum};
use rebatch_core::{search_operation, Config, Error, OutputFormatter};
use std::path::PathBuf;
use std::process;

/// Find the most starred GitHub repositories created in a date range
#[derive(Parser, Debug)]
#[command(name = "ghstars")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Start date in YYYY-MM-DD format (default: 30 days ago)
    #[arg(long = "from", value_name = "DATE")]
    from: Option<String>,

    /// End date in YYYY-MM-DD format (default: today)
    #[arg(long = "to", value_name = "DATE")]
    to: Option<String>,

    /// Number of repositories to display
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=1000))]
    count: u16,

    /// Filter repositories by programming language (e.g. Python, Rust)
    #[arg(long)]
    language: Option<String>,

    /// Export results to a JSON file
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    output: OutputArg,

    /// GitHub API token; raises the search rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum OutputArg {
    Summary,
    Json,
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match run(cli, &config) {
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

fn run(cli: Cli, config: &Config) -> Result<()> {
    let today: NaiveDate = Local::now().date_naive();
    let from = cli
        .from
        .unwrap_or_else(|| (today - Duration::days(30)).to_string());
    let to = cli.to.unwrap_or_else(|| today.to_string());

    // Token resolution: flag (with its GITHUB_TOKEN env fallback), then the
    // config file. Injected here once; the core never reads the environment.
    let token = cli.token.or_else(|| config.github.token.clone());

    if cli.output == OutputArg::Summary {
        eprintln!(
            "Searching for the top {} repositories by stars, created {} to {}",
            cli.count, from, to
        );
        if let Some(language) = &cli.language {
            eprintln!("Language: {language}");
        }
    }

    let (result, _) = search_operation(
        token,
        &config.github.api_url,
        &from,
        &to,
        usize::from(cli.count),
        cli.language,
        cli.export.as_deref(),
    )?;

    match cli.output {
        OutputArg::Json => println!("{}", result.format_json()),
        OutputArg::Summary => print!("{}", result.format_summary()),
    }

    Ok(())
}

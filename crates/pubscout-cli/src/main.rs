//! Command line tool that lists PubMed papers with pharmaceutical or biotech company authors.
//!
//! The tool runs a PubMed query, keeps the papers that have at least one industry-affiliated
//! author, and prints them as CSV using the `pubscout` library.
//!
//! # Usage
//!
//! ```bash
//! # Print matching papers as CSV
//! get-papers-list "cancer drug development"
//!
//! # Save them to a file instead
//! get-papers-list "COVID-19 vaccine" -f covid_papers.csv
//!
//! # Show what is happening along the way
//! get-papers-list "alzheimer AND pharmaceutical" -d
//! ```
//!
//! CSV goes to standard output; status messages and logs go to standard error, so the output can
//! be piped straight into other tools.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{collections::BTreeSet, path::PathBuf};

use clap::{builder::ArgAction, Parser};
use console::style;
use pubscout::{prelude::*, Config};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod interaction;
pub mod search;

use crate::{error::*, interaction::*, search::*};

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(
  name = "get-papers-list",
  author,
  version,
  about = "Fetch research papers from PubMed and identify pharmaceutical/biotech company \
           affiliations.",
  after_help = "Examples:
  get-papers-list \"cancer drug development\"
  get-papers-list \"COVID-19 vaccine\" -f covid_papers.csv
  get-papers-list \"alzheimer AND pharmaceutical\" -d
  get-papers-list \"diabetes[MeSH] AND clinical trial\" --file diabetes_studies.csv

Queries use standard PubMed syntax: AND/OR/NOT, [MeSH] terms, field tags such as author[au] or \
                title[ti], and [dp] date ranges."
)]
pub struct Cli {
  /// Search query using PubMed syntax
  query: String,

  /// Save results as CSV to this file instead of printing them
  #[arg(short, long, value_name = "FILENAME")]
  file: Option<PathBuf>,

  /// Print debug information during execution
  #[arg(short, long)]
  debug: bool,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,

  /// Maximum number of papers to fetch [default: 100, or the config file value]
  #[arg(long, value_name = "N")]
  max_results: Option<usize>,

  /// Contact email for NCBI API usage
  #[arg(long, value_name = "EMAIL")]
  email: Option<String>,

  /// NCBI API key for increased rate limits
  #[arg(long, value_name = "KEY")]
  api_key: Option<String>,

  /// Path to a TOML config file. Defaults to the platform config directory.
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,
}

impl Cli {
  /// Loads the config file and applies the command line overrides on top of it.
  fn resolve_config(&self) -> Result<Config> {
    let path = self.config.clone().unwrap_or_else(Config::default_path);
    debug!("Loading config from {}", path.display());
    let mut config = Config::load(&path)?;
    if let Some(max_results) = self.max_results {
      config = config.with_max_results(max_results);
    }
    if let Some(email) = &self.email {
      config = config.with_email(email);
    }
    if let Some(api_key) = &self.api_key {
      config = config.with_api_key(api_key);
    }
    config.validate()?;
    trace!(?config, "Resolved config");
    Ok(config)
  }
}

/// Configures the logging system.
///
/// `RUST_LOG` wins when set. Otherwise `--debug` turns on debug logs and each `-v` raises the
/// level one step from the default of errors only:
/// - 0: error
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8, debug: bool) {
  let verbosity = if debug { verbosity.max(3) } else { verbosity };
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Parses arguments, runs the search, and exits with status 1 on any error.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose, cli.debug);

  let terminal = Terminal;
  if let Err(error) = run(&terminal, &cli).await {
    debug!(?error, "Run failed");
    eprintln!("{}An error occurred: {}", style(ERROR_PREFIX).red(), error);
    std::process::exit(1);
  }
}

/// Builds the client from the resolved config and runs the search.
async fn run<I: UserInteraction>(interaction: &I, cli: &Cli) -> Result<()> {
  let config = cli.resolve_config()?;
  let client = pubscout::retriever::PubMedClient::new(config.retriever.clone())?;
  let options = SearchOptions {
    query:       cli.query.clone(),
    max_results: config.max_results,
    file:        cli.file.clone(),
    debug:       cli.debug,
  };
  search(interaction, &client, options).await
}

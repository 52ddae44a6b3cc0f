//! Errors surfaced by the command line tool.

use thiserror::Error;

use super::*;

/// Result alias for the command line tool.
pub type Result<T> = core::result::Result<T, CliError>;

/// Anything that can stop a run of `get-papers-list`.
#[derive(Error, Debug)]
pub enum CliError {
  /// Retrieval, parsing, configuration, or CSV failure from the library.
  #[error(transparent)]
  Pubscout(#[from] PubscoutError),

  /// Failure writing to the terminal.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

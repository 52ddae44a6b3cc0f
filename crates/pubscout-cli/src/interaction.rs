//! Everything the tool tells the user goes through [`UserInteraction`].

use std::io::{self, Write};

use pubscout::output;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for list entries
pub static ITEM_PREFIX: &str = "  - ";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Progress or status
  Info(&'a str),
  /// A step finished well
  Success(&'a str),
  /// The run ends early without an error
  Warning(&'a str),
  /// Papers to print as CSV
  Papers(&'a [PaperRecord]),
  /// Every company found, already sorted
  Companies(&'a BTreeSet<String>),
}

/// A place to send [`ResponseContent`].
pub trait UserInteraction {
  /// Shows one piece of content.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// The real terminal: CSV on standard output, everything else on standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl UserInteraction for Terminal {
  fn reply(&self, content: ResponseContent) -> Result<()> {
    let mut stderr = io::stderr().lock();
    match content {
      ResponseContent::Info(message) =>
        writeln!(stderr, "{}{}", style(INFO_PREFIX).cyan(), message)?,
      ResponseContent::Success(message) =>
        writeln!(stderr, "{}{}", style(SUCCESS_PREFIX).green(), message)?,
      ResponseContent::Warning(message) =>
        writeln!(stderr, "{}{}", style(WARNING_PREFIX).yellow(), message)?,
      ResponseContent::Papers(papers) => output::write_records(papers, io::stdout().lock())?,
      ResponseContent::Companies(companies) => {
        writeln!(stderr, "{}Companies found:", style(INFO_PREFIX).cyan())?;
        for company in companies {
          writeln!(stderr, "{}{}", ITEM_PREFIX, style(company).bold())?;
        }
      },
    }
    Ok(())
  }
}

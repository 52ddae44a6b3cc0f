//! Error types for the pubscout library.
//!
//! Two families live here. Record-level errors ([`PubscoutError::RecordShape`] and
//! [`PubscoutError::RecordFatal`]) are raised inside the normalizer and always recovered before
//! they reach a caller: a bad field degrades to its neutral default and a bad record is dropped.
//! Everything else comes from the retrieval and presentation collaborators and propagates
//! normally.
//!
//! # Examples
//!
//! ```no_run
//! use pubscout::{error::PubscoutError, retriever::PubMedClient, prelude::*};
//!
//! # async fn example(client: PubMedClient) -> Result<(), PubscoutError> {
//! match client.search("crispr", 10).await {
//!   Err(PubscoutError::Network(e)) => println!("Network error: {}", e),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(ids) => println!("Found {} ids", ids.len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`pubscout`](crate) crate.
pub type Result<T> = core::result::Result<T, PubscoutError>;

/// Errors that can occur when retrieving, normalizing, or writing papers.
#[derive(Error, Debug)]
pub enum PubscoutError {
  /// One field inside one raw record has an unexpected shape.
  ///
  /// Recovered inside the normalizer: the field falls back to its neutral default (empty string or
  /// empty sequence) and the rest of the record is still processed.
  #[error("Unexpected shape for field `{field}`: {reason}")]
  RecordShape {
    /// Name of the field being extracted
    field:  &'static str,
    /// What was found instead
    reason: String,
  },

  /// The raw record itself is not a mapping.
  ///
  /// Recovered at record granularity: the record is dropped and the batch continues.
  #[error("Malformed record: {0}")]
  RecordFatal(String),

  /// A network request failed or the server answered with a non-success status.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The E-utilities API answered with something we could not use.
  #[error("API error: {0}")]
  ApiError(String),

  /// A JSON payload could not be decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A configured URL could not be parsed or joined.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// Writing CSV output failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file is not valid TOML for [`Config`](crate::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration is inconsistent.
  #[error("{0}")]
  Config(String),
}

impl PubscoutError {
  /// Shorthand for building a [`PubscoutError::RecordShape`].
  pub(crate) fn shape(field: &'static str, reason: impl Into<String>) -> Self {
    Self::RecordShape { field, reason: reason.into() }
  }
}

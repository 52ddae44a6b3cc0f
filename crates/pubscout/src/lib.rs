//! Industry-affiliated paper discovery for PubMed.
//!
//! `pubscout` retrieves bibliographic records from PubMed, rebuilds a stable
//! [`PaperRecord`](record::PaperRecord) out of the irregular nested XML, and keeps only the papers
//! that have at least one author affiliated with a pharmaceutical or biotech company.
//!
//! # Features
//!
//! - **Defensive normalization**: fields that arrive as a mapping, as a list of mappings, or not at
//!   all are all coerced through one primitive, [`normalize::as_sequence`]
//! - **Auditable classification**: affiliations are classified by an ordered rule cascade over
//!   static word tables, no trained model involved
//! - **Company extraction**: known-company lookups plus capitalized-phrase patterns, all
//!   standardized into one canonical spelling
//! - **Retrieval**: batched, paced calls to the NCBI E-utilities API
//! - **Presentation**: fixed six-column CSV output
//!
//! # Getting Started
//!
//! ```no_run
//! use pubscout::{prelude::*, retriever::PubMedClient, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load(Config::default_path())?;
//!   let client = PubMedClient::new(config.retriever)?;
//!
//!   let outcome = find_industry_papers(&client, "cancer immunotherapy", 50).await?;
//!   for paper in &outcome.papers {
//!     println!("{}: {:?}", paper.title, paper.company_affiliations);
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`xml`]: XML to nested [`serde_json::Value`] conversion
//! - [`normalize`]: raw article record to [`PaperRecord`](record::PaperRecord)
//! - [`classify`]: affiliation classification and company extraction
//! - [`filter`]: keeps papers with industry-affiliated authors
//! - [`retriever`]: the PubMed E-utilities client
//! - [`output`]: CSV presentation
//! - [`config`]: TOML configuration

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeSet,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod record;
pub mod retriever;
pub mod xml;

pub use crate::config::Config;
use crate::{error::*, record::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use pubscout::prelude::*;
///
/// fn example(papers: Vec<PaperRecord>) -> Vec<PaperRecord> {
///   PaperFilter::default().filter(papers)
/// }
/// ```
pub mod prelude {
  pub use crate::{
    classify::{AffiliationClassifier, Classification},
    error::PubscoutError,
    filter::PaperFilter,
    record::{Author, PaperRecord},
    retriever::{find_industry_papers, LiteratureSource, PipelineOutcome},
  };
}

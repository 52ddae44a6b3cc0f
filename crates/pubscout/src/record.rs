//! Normalized paper and author records.
//!
//! A [`PaperRecord`] is built once per raw PubMed article by the
//! [`normalize`](crate::normalize) module. The only fields written afterwards are
//! [`PaperRecord::non_academic_authors`] and [`PaperRecord::company_affiliations`], which the
//! [`PaperFilter`](crate::filter::PaperFilter) fills in for the papers it keeps.

use super::*;

/// A paper rebuilt from one PubMed article record.
///
/// Every text field uses the empty string when the source had nothing usable, so downstream code
/// never deals with missing values.
///
/// # Examples
///
/// ```
/// use pubscout::record::{Author, PaperRecord};
///
/// let paper = PaperRecord {
///   id: "38012345".to_string(),
///   title: "A phase II trial".to_string(),
///   publication_date: "2023-Jan-15".to_string(),
///   authors: vec![Author::new("John Smith", vec!["Pfizer Inc, New York, NY, USA".to_string()])],
///   ..Default::default()
/// };
/// assert!(paper.non_academic_authors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// PubMed identifier (PMID)
  pub id:                   String,
  /// Article title
  pub title:                String,
  /// `YYYY[-Month[-Day]]` or a bare year
  pub publication_date:     String,
  /// Authors in source order, none of them with an empty name
  pub authors:              Vec<Author>,
  /// First email address found in any affiliation
  pub corresponding_email:  String,
  /// Names of the authors classified as industry-affiliated, in author order
  #[serde(default)]
  pub non_academic_authors: Vec<String>,
  /// Standardized company names extracted from those authors' affiliations
  #[serde(default)]
  pub company_affiliations: BTreeSet<String>,
}

/// One author of a [`PaperRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Display name, `"{forename} {lastname}"` or `"{initials} {lastname}"`
  pub name:         String,
  /// Raw affiliation strings, in source order
  pub affiliations: Vec<String>,
}

impl Author {
  /// Creates an author from a name and its affiliation strings.
  pub fn new(name: impl Into<String>, affiliations: Vec<String>) -> Self {
    Self { name: name.into(), affiliations }
  }
}

impl PaperRecord {
  /// Whether the paper filter found at least one industry-affiliated author.
  pub fn has_industry_authors(&self) -> bool { !self.non_academic_authors.is_empty() }
}

//! Keeps the papers that have at least one industry-affiliated author.
//!
//! Each affiliation of each author is classified on its own. An author counts as non-academic when
//! at least one of their affiliations is non-academic and names a company; a paper is kept when it
//! has at least one such author. Kept papers gain the author names and the union of their
//! companies, so the two derived fields are always populated together.

use super::*;
use crate::classify::AffiliationClassifier;

/// Applies an [`AffiliationClassifier`] to whole papers.
///
/// # Examples
///
/// ```
/// use pubscout::prelude::*;
///
/// let paper = PaperRecord {
///   id: "1".into(),
///   authors: vec![
///     Author::new("Ann Academic", vec!["University of Oxford".into()]),
///     Author::new("Ivan Industry", vec!["Biogen, Cambridge, MA".into()]),
///   ],
///   ..Default::default()
/// };
///
/// let kept = PaperFilter::default().filter(vec![paper]);
/// assert_eq!(kept[0].non_academic_authors, vec!["Ivan Industry"]);
/// assert!(kept[0].company_affiliations.contains("Biogen"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaperFilter {
  /// Classifier consulted for every affiliation
  classifier: AffiliationClassifier,
}

impl PaperFilter {
  /// Creates a filter around a specific classifier.
  pub fn new(classifier: AffiliationClassifier) -> Self { Self { classifier } }

  /// Companies an author is affiliated with, gathered over all of their non-academic affiliations.
  pub fn author_companies(&self, author: &Author) -> BTreeSet<String> {
    author
      .affiliations
      .iter()
      .map(|affiliation| self.classifier.classify(affiliation))
      .filter(|classification| classification.is_non_academic)
      .flat_map(|classification| classification.companies)
      .collect()
  }

  /// Fills in the derived fields of one paper, returning it only if it has an industry author.
  pub fn annotate(&self, mut paper: PaperRecord) -> Option<PaperRecord> {
    let mut names = Vec::new();
    let mut companies = BTreeSet::new();

    for author in &paper.authors {
      let author_companies = self.author_companies(author);
      if !author_companies.is_empty() {
        names.push(author.name.clone());
        companies.extend(author_companies);
      }
    }

    if names.is_empty() {
      trace!("No industry authors on paper {:?}", paper.id);
      return None;
    }

    paper.non_academic_authors = names;
    paper.company_affiliations = companies;
    Some(paper)
  }

  /// Keeps the papers with at least one industry-affiliated author, in input order.
  pub fn filter(&self, papers: Vec<PaperRecord>) -> Vec<PaperRecord> {
    let total = papers.len();
    let kept: Vec<PaperRecord> =
      papers.into_iter().filter_map(|paper| self.annotate(paper)).collect();
    debug!("Kept {} of {} papers with industry authors", kept.len(), total);
    kept
  }
}

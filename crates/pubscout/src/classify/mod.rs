//! Affiliation classification and company extraction.
//!
//! An affiliation string is classified by walking [`Rule::CASCADE`] in order; the first rule that
//! fires decides the outcome, and an affiliation that no rule claims is academic. Academic
//! keywords are checked first on purpose so that phrases like "research center" or a company name
//! mentioned next to a university never make an affiliation look corporate.
//!
//! Classification is a pure function of the affiliation string and the [`HeuristicTables`], so a
//! single [`AffiliationClassifier`] can be shared freely across threads.
//!
//! # Examples
//!
//! ```
//! use pubscout::classify::AffiliationClassifier;
//!
//! let classifier = AffiliationClassifier::default();
//!
//! let industry = classifier.classify("Pfizer Inc, New York, NY, USA");
//! assert!(industry.is_non_academic);
//! assert!(industry.companies.contains("Pfizer"));
//!
//! let academic = classifier.classify("Pfizer Research Fellow, Harvard Medical School");
//! assert!(!academic.is_non_academic);
//! assert!(academic.companies.is_empty());
//! ```

use std::sync::Arc;

use super::*;

pub mod extract;
pub mod tables;

pub use tables::HeuristicTables;

/// One step of the classification cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
  /// An academic keyword appears anywhere in the affiliation.
  AcademicKeyword,
  /// A generic industry word appears anywhere in the affiliation.
  IndustryIndicator,
  /// A known pharma or biotech company name appears anywhere in the affiliation.
  KnownCompany,
  /// A corporate suffix appears as a separate word after other text.
  CorporateSuffix,
}

impl Rule {
  /// Evaluation order. Changing it changes which signals dominate.
  pub const CASCADE: [Rule; 4] =
    [Rule::AcademicKeyword, Rule::IndustryIndicator, Rule::KnownCompany, Rule::CorporateSuffix];

  /// Whether an affiliation matched by this rule is non-academic.
  pub fn marks_non_academic(self) -> bool { !matches!(self, Rule::AcademicKeyword) }

  /// Tests the rule against a lowercased affiliation.
  pub fn matches(self, tables: &HeuristicTables, lower: &str) -> bool {
    match self {
      Rule::AcademicKeyword => tables.academic_keywords.iter().any(|word| lower.contains(word)),
      Rule::IndustryIndicator => tables.industry_indicators.iter().any(|word| lower.contains(word)),
      Rule::KnownCompany => tables.known_companies.iter().any(|name| lower.contains(name)),
      Rule::CorporateSuffix =>
        tables.corporate_suffixes.iter().any(|suffix| contains_suffix_token(lower, suffix)),
    }
  }
}

/// Outcome of classifying one affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
  /// Whether the affiliation looks corporate
  pub is_non_academic: bool,
  /// Standardized company names found; always empty for academic affiliations
  pub companies:       BTreeSet<String>,
  /// The rule that decided the outcome, `None` when nothing matched
  pub decided_by:      Option<Rule>,
}

/// Classifies affiliations and extracts company names from them.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
  /// Word tables shared by every clone of this classifier
  tables: Arc<HeuristicTables>,
}

impl Default for AffiliationClassifier {
  fn default() -> Self { Self { tables: Arc::clone(&tables::DEFAULT_TABLES) } }
}

impl AffiliationClassifier {
  /// Creates a classifier over custom tables.
  pub fn with_tables(tables: HeuristicTables) -> Self { Self { tables: Arc::new(tables) } }

  /// The tables this classifier consults.
  pub fn tables(&self) -> &HeuristicTables { &self.tables }

  /// Finds the first rule in [`Rule::CASCADE`] that matches, if any.
  pub fn decide(&self, affiliation: &str) -> Option<Rule> {
    let lower = affiliation.to_lowercase();
    Rule::CASCADE.into_iter().find(|rule| rule.matches(&self.tables, &lower))
  }

  /// Whether an affiliation is non-academic. Unmatched affiliations are academic.
  pub fn is_non_academic(&self, affiliation: &str) -> bool {
    self.decide(affiliation).is_some_and(Rule::marks_non_academic)
  }

  /// Classifies an affiliation and, when it is non-academic, extracts its companies.
  pub fn classify(&self, affiliation: &str) -> Classification {
    let decided_by = self.decide(affiliation);
    let is_non_academic = decided_by.is_some_and(Rule::marks_non_academic);
    let companies =
      if is_non_academic { self.extract_companies(affiliation) } else { BTreeSet::new() };
    trace!(?decided_by, ?companies, "Classified affiliation {:?}", affiliation);
    Classification { is_non_academic, companies, decided_by }
  }
}

/// Whether `suffix` occurs as its own word: preceded by a space and followed by the end of the
/// text or a non-alphanumeric character such as `.` or `,`.
fn contains_suffix_token(lower: &str, suffix: &str) -> bool {
  let needle = format!(" {}", suffix);
  lower.match_indices(&needle).any(|(start, _)| {
    lower[start + needle.len()..].chars().next().map_or(true, |next| !next.is_alphanumeric())
  })
}

//! Company name extraction and standardization.

use super::*;

lazy_static! {
  /// Capitalized phrases that look like company names, matched against the original-case text.
  static ref COMPANY_PATTERNS: [Regex; 3] = [
    // Name ending in a legal-form suffix
    Regex::new(r"[A-Z][A-Za-z\s&-]+(?:Inc|Corp|Ltd|LLC|PLC|AG|SA|BV|NV|GmbH)\.?").unwrap(),
    // Name ending in a pharma/biotech word
    Regex::new(r"[A-Z][A-Za-z\s&-]+(?:Pharmaceutical|Pharma|Biotech|Therapeutics)s?").unwrap(),
    // Name ending in a group-structure word
    Regex::new(r"[A-Z][A-Za-z\s&-]+(?:Company|Group|Holdings|International|Global)").unwrap(),
  ];
  /// Runs of whitespace.
  static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
  /// Trailing punctuation left over by a pattern match.
  static ref TRAILING_PUNCTUATION: Regex = Regex::new(r"[.,;:]+$").unwrap();
}

/// Pattern matches of this many characters or fewer are discarded as noise.
const MIN_PATTERN_MATCH_CHARS: usize = 3;

impl AffiliationClassifier {
  /// Extracts every company name mentioned in an affiliation.
  ///
  /// Combines known-company table hits with capitalized-phrase pattern matches, standardizing
  /// both. Overlapping results such as `"Pfizer"` and `"Pfizer Inc"` are both kept.
  pub fn extract_companies(&self, affiliation: &str) -> BTreeSet<String> {
    let lower = affiliation.to_lowercase();

    let mut companies: BTreeSet<String> = self
      .tables
      .known_companies
      .iter()
      .filter(|company| lower.contains(*company))
      .map(|company| self.standardize(company))
      .collect();

    for pattern in COMPANY_PATTERNS.iter() {
      for found in pattern.find_iter(affiliation) {
        let cleaned = self.clean(found.as_str());
        if cleaned.chars().count() > MIN_PATTERN_MATCH_CHARS {
          companies.insert(cleaned);
        } else {
          trace!("Discarding short company match {:?}", cleaned);
        }
      }
    }

    companies
  }

  /// Produces the canonical spelling of a company name.
  ///
  /// Known abbreviations are upper-cased, a bare `&` is kept, and every other word is capitalized.
  ///
  /// ```
  /// use pubscout::classify::AffiliationClassifier;
  ///
  /// let classifier = AffiliationClassifier::default();
  /// assert_eq!(classifier.standardize("johnson & johnson"), "Johnson & Johnson");
  /// assert_eq!(classifier.standardize("gsk vaccines"), "GSK Vaccines");
  /// ```
  pub fn standardize(&self, name: &str) -> String {
    name
      .split_whitespace()
      .map(|word| {
        let lower = word.to_lowercase();
        if self.tables.abbreviations.contains(lower.as_str()) {
          word.to_uppercase()
        } else if word == "&" {
          word.to_string()
        } else {
          capitalize(&lower)
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Collapses whitespace, strips trailing punctuation, and standardizes a pattern match.
  fn clean(&self, raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
    let stripped = TRAILING_PUNCTUATION.replace(&collapsed, "");
    self.standardize(&stripped)
  }
}

/// Upper-cases the first character of an already lowercased word.
fn capitalize(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn extract(affiliation: &str) -> BTreeSet<String> {
    AffiliationClassifier::default().extract_companies(affiliation)
  }

  #[test]
  fn test_table_and_pattern_matches_overlap() {
    let companies = extract("Pfizer Inc, New York, NY, USA");
    assert!(companies.contains("Pfizer"));
    assert!(companies.contains("Pfizer Inc"));
    assert_eq!(companies.len(), 2);
  }

  #[test]
  fn test_ampersand_is_kept() {
    let companies = extract("Johnson & Johnson, New Brunswick, NJ");
    assert_eq!(companies, BTreeSet::from(["Johnson & Johnson".to_string()]));
  }

  #[test]
  fn test_pharma_suffix_pattern() {
    let companies = extract("Novartis Pharmaceuticals, Basel, Switzerland");
    assert_eq!(
      companies,
      BTreeSet::from(["Novartis".to_string(), "Novartis Pharmaceuticals".to_string()])
    );
  }

  #[test]
  fn test_unknown_company_by_pattern() {
    let companies = extract("Acme Widgets Ltd., Cambridge, UK");
    assert_eq!(companies, BTreeSet::from(["Acme Widgets Ltd".to_string()]));

    let companies = extract("Research Division, Zenith Holdings");
    assert_eq!(companies, BTreeSet::from(["Zenith Holdings".to_string()]));
  }

  #[test]
  fn test_multiple_known_companies() {
    let companies = extract("Joint venture of Pfizer and BioNTech, Mainz");
    assert!(companies.contains("Pfizer"));
    assert!(companies.contains("Biontech"));
  }

  #[test]
  fn test_standardize() {
    let classifier = AffiliationClassifier::default();
    assert_eq!(classifier.standardize("bristol-myers squibb"), "Bristol-myers Squibb");
    assert_eq!(classifier.standardize("J&J  r&d"), "J&J R&D");
    assert_eq!(classifier.standardize("ELI LILLY"), "Eli Lilly");
    assert_eq!(classifier.standardize(""), "");
  }

  #[test]
  fn test_clean() {
    let classifier = AffiliationClassifier::default();
    assert_eq!(classifier.clean("  Acme\n  Bio   Corp.;"), "Acme Bio Corp");
  }
}

//! Static word tables behind the affiliation rules.
//!
//! All entries are lowercase; matching happens against the lowercased affiliation.

use super::*;

/// Substrings that mark an academic, clinical, or governmental institution.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
  "university",
  "college",
  "school",
  "institute",
  "hospital",
  "medical center",
  "health center",
  "clinic",
  "academic",
  "department",
  "faculty",
  "laboratory",
  "lab",
  "center for",
  "national institutes",
  "nih",
  "nsf",
  "research center",
  "medical school",
  "graduate school",
  "postdoctoral",
  "graduate student",
  "undergraduate",
  "phd",
  "md",
  "dvm",
];

/// Generic words that signal pharmaceutical or biotech industry work.
pub const INDUSTRY_INDICATORS: &[&str] = &[
  "pharmaceutical",
  "pharmaceuticals",
  "pharma",
  "biotech",
  "biotechnology",
  "biopharmaceutical",
  "biopharmaceuticals",
  "therapeutics",
  "medicines",
  "drug",
  "drugs",
  "vaccines",
  "biologics",
  "biosimilar",
  "biosimilars",
  "clinical research",
  "clinical development",
  "r&d",
  "research and development",
  "medical affairs",
  "global medical",
  "regulatory affairs",
];

/// Major pharmaceutical companies.
pub const PHARMA_COMPANIES: &[&str] = &[
  "pfizer",
  "johnson & johnson",
  "j&j",
  "janssen",
  "roche",
  "genentech",
  "novartis",
  "merck",
  "msd",
  "bristol-myers squibb",
  "bms",
  "abbvie",
  "sanofi",
  "glaxosmithkline",
  "gsk",
  "astrazeneca",
  "boehringer ingelheim",
  "takeda",
  "eli lilly",
  "lilly",
  "bayer",
  "biogen",
  "celgene",
  "amgen",
  "gilead",
  "regeneron",
  "vertex",
  "moderna",
  "biontech",
  "alexion",
  "shire",
  "allergan",
  "teva",
  "mylan",
  "sandoz",
  "hospira",
  "watson",
  "actavis",
  "valeant",
  "mallinckrodt",
  "endo",
  "purdue pharma",
  "otsuka",
  "daiichi sankyo",
  "astellas",
  "eisai",
  "sumitomo dainippon",
  "mitsubishi tanabe",
  "chugai",
  "kyowa kirin",
  "ono pharmaceutical",
  "shionogi",
  "tsumura",
];

/// Biotech and cell/gene therapy companies, including a few flagship product names.
pub const BIOTECH_COMPANIES: &[&str] = &[
  "genentech",
  "amgen",
  "biogen",
  "celgene",
  "regeneron",
  "vertex",
  "moderna",
  "biontech",
  "alexion",
  "incyte",
  "bluebird bio",
  "crispr therapeutics",
  "editas medicine",
  "intellia therapeutics",
  "sangamo therapeutics",
  "precision biosciences",
  "beam therapeutics",
  "prime medicine",
  "mammoth biosciences",
  "caribou biosciences",
  "allogene therapeutics",
  "car-t",
  "juno therapeutics",
  "kite pharma",
  "novartis gene therapies",
  "bluerock therapeutics",
  "fate therapeutics",
  "cellular biomedicine",
  "celularity",
  "cellectis",
  "celyad",
  "oxford biomedica",
  "orchard therapeutics",
  "uniqure",
  "spark therapeutics",
  "avexis",
  "zolgensma",
  "luxturna",
  "kymriah",
  "yescarta",
  "tecartus",
  "abecma",
  "breyanzi",
  "carvykti",
  "roctavian",
  "hemgenix",
  "casgevy",
];

/// Legal-form and corporate-structure tokens.
pub const CORPORATE_SUFFIXES: &[&str] = &[
  "inc",
  "incorporated",
  "corp",
  "corporation",
  "ltd",
  "limited",
  "llc",
  "plc",
  "ag",
  "sa",
  "bv",
  "nv",
  "gmbh",
  "co",
  "company",
  "companies",
  "group",
  "holdings",
  "international",
  "global",
  "worldwide",
  "usa",
  "america",
  "europe",
  "asia",
  "japan",
  "china",
  "uk",
  "germany",
  "france",
];

/// Words kept fully upper-case when standardizing a company name.
pub const ABBREVIATIONS: &[&str] = &["j&j", "bms", "gsk", "msd", "r&d"];

/// Read-only lookup tables used by an [`AffiliationClassifier`].
///
/// The default tables are built once per process and shared; custom tables can be built for
/// tests or specialised runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicTables {
  /// See [`ACADEMIC_KEYWORDS`]
  pub academic_keywords:   BTreeSet<&'static str>,
  /// See [`INDUSTRY_INDICATORS`]
  pub industry_indicators: BTreeSet<&'static str>,
  /// Union of [`PHARMA_COMPANIES`] and [`BIOTECH_COMPANIES`]
  pub known_companies:     BTreeSet<&'static str>,
  /// See [`CORPORATE_SUFFIXES`]
  pub corporate_suffixes:  BTreeSet<&'static str>,
  /// See [`ABBREVIATIONS`]
  pub abbreviations:       BTreeSet<&'static str>,
}

lazy_static! {
  /// Process-wide default tables.
  pub static ref DEFAULT_TABLES: Arc<HeuristicTables> = Arc::new(HeuristicTables::default());
}

impl Default for HeuristicTables {
  fn default() -> Self {
    Self {
      academic_keywords:   ACADEMIC_KEYWORDS.iter().copied().collect(),
      industry_indicators: INDUSTRY_INDICATORS.iter().copied().collect(),
      known_companies:     PHARMA_COMPANIES.iter().chain(BIOTECH_COMPANIES).copied().collect(),
      corporate_suffixes:  CORPORATE_SUFFIXES.iter().copied().collect(),
      abbreviations:       ABBREVIATIONS.iter().copied().collect(),
    }
  }
}

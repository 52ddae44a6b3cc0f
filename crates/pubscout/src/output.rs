//! CSV presentation of filtered papers.
//!
//! Output always starts with the [`HEADERS`] row followed by one row per paper in input order.
//! Multi-valued columns are joined with `"; "`, and every text value goes through [`clean_text`]
//! so that a row never spans more than one line.

use std::{fs::File, io};

use super::*;

/// Column headers, in output order.
pub const HEADERS: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academic Author(s)",
  "Company Affiliation(s)",
  "Corresponding Author Email",
];

/// Longest value written to a cell, in characters.
pub const MAX_CELL_CHARS: usize = 1000;

/// Separator for multi-valued cells.
const LIST_SEPARATOR: &str = "; ";

/// Collapses all whitespace runs (newlines and tabs included) to single spaces and truncates the
/// result to [`MAX_CELL_CHARS`], ending truncated values with `...`.
///
/// ```
/// use pubscout::output::clean_text;
///
/// assert_eq!(clean_text("  A\ttitle\r\nacross lines "), "A title across lines");
/// assert_eq!(clean_text(&"x".repeat(1500)).chars().count(), 1000);
/// ```
pub fn clean_text(text: &str) -> String {
  let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
  if cleaned.chars().count() <= MAX_CELL_CHARS {
    return cleaned;
  }
  let mut truncated: String = cleaned.chars().take(MAX_CELL_CHARS - 3).collect();
  truncated.push_str("...");
  truncated
}

/// Formats one paper as a CSV row.
pub fn to_row(paper: &PaperRecord) -> [String; 6] {
  let companies: Vec<&str> = paper.company_affiliations.iter().map(String::as_str).collect();
  [
    clean_text(&paper.id),
    clean_text(&paper.title),
    clean_text(&paper.publication_date),
    clean_text(&paper.non_academic_authors.join(LIST_SEPARATOR)),
    clean_text(&companies.join(LIST_SEPARATOR)),
    clean_text(&paper.corresponding_email),
  ]
}

/// Writes the header row and one row per paper to any writer.
pub fn write_records<W: io::Write>(papers: &[PaperRecord], writer: W) -> Result<()> {
  let mut csv = csv::Writer::from_writer(writer);
  csv.write_record(HEADERS)?;
  for paper in papers {
    csv.write_record(to_row(paper))?;
  }
  csv.flush()?;
  Ok(())
}

/// Writes papers to a CSV file, replacing any existing file.
pub fn write_to_file(papers: &[PaperRecord], path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  debug!("Writing {} papers to {}", papers.len(), path.display());
  write_records(papers, File::create(path)?)
}

/// Renders papers as a CSV string.
pub fn to_csv_string(papers: &[PaperRecord]) -> Result<String> {
  let mut buffer = Vec::new();
  write_records(papers, &mut buffer)?;
  Ok(String::from_utf8_lossy(&buffer).into_owned())
}

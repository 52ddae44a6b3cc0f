//! Raw PubMed article to [`PaperRecord`] normalization.
//!
//! Raw records come out of [`xml::convert_to_json`] and inherit its irregularity: `Author` is a
//! mapping for single-author papers and an array otherwise, `AffiliationInfo` may be missing, one
//! mapping, or several, and text-bearing elements turn into `{"@attr": .., "$text": ..}` mappings
//! as soon as they carry attributes. Everything here goes through [`as_sequence`] and a handful of
//! small accessors so that no extraction site does its own type checks.
//!
//! Normalization never fails past [`normalize_record`]. A field with an unexpected shape is logged
//! and left at its neutral default; a record that is not a mapping at all is logged and dropped.

use super::*;

lazy_static! {
  /// A 19xx or 20xx year inside free text such as `"2023 Jan-Feb"`.
  static ref YEAR: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").unwrap();
  /// Email address embedded in affiliation text.
  static ref EMAIL: Regex =
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
}

/// Path from the article root to the `Article` element.
const ARTICLE_PATH: [&str; 2] = ["MedlineCitation", "Article"];
/// Path from the `Article` element to the publication date.
const PUB_DATE_PATH: [&str; 3] = ["Journal", "JournalIssue", "PubDate"];
/// Path from the `Article` element to the raw author entries.
const AUTHOR_PATH: [&str; 2] = ["AuthorList", "Author"];

/// Coerces an "absent, single value, or sequence" field into a sequence.
///
/// This is the one primitive that absorbs the source's habit of only emitting an array once an
/// element repeats.
///
/// ```
/// use pubscout::normalize::as_sequence;
/// use serde_json::json;
///
/// assert!(as_sequence(None).is_empty());
/// assert_eq!(as_sequence(Some(&json!({ "a": 1 }))).len(), 1);
/// assert_eq!(as_sequence(Some(&json!([1, 2, 3]))).len(), 3);
/// ```
pub fn as_sequence(value: Option<&Value>) -> Vec<&Value> {
  match value {
    None | Some(Value::Null) => Vec::new(),
    Some(Value::Array(items)) => items.iter().collect(),
    Some(other) => vec![other],
  }
}

/// Normalizes a batch of raw records, keeping their order and skipping the ones that are dropped.
pub fn normalize_records(raw: &[Value]) -> Vec<PaperRecord> {
  let papers: Vec<PaperRecord> = raw.iter().filter_map(normalize_record).collect();
  debug!("Normalized {} of {} raw records", papers.len(), raw.len());
  papers
}

/// Normalizes one raw article record.
///
/// Returns `None` only when the record itself is not a mapping.
pub fn normalize_record(raw: &Value) -> Option<PaperRecord> {
  match PaperRecord::from_raw(raw) {
    Ok(paper) => Some(paper),
    Err(e) => {
      warn!("Dropping record: {}", e);
      None
    },
  }
}

impl PaperRecord {
  /// Builds a [`PaperRecord`] from a raw article.
  ///
  /// Only [`PubscoutError::RecordFatal`] is returned; per-field problems are absorbed here.
  pub fn from_raw(raw: &Value) -> Result<Self> {
    if !raw.is_object() {
      return Err(PubscoutError::RecordFatal(format!("expected a mapping, found {}", kind(raw))));
    }

    let id = recover("id", extract_id(raw), String::new);
    let article = recover("article", descend(Some(raw), &ARTICLE_PATH), || None);
    let title = recover("title", extract_title(article), String::new);
    let publication_date =
      recover("publication_date", extract_publication_date(article), String::new);
    let author_entries = recover("authors", descend(article, &AUTHOR_PATH), || None);
    let authors = extract_authors(author_entries);
    let corresponding_email = find_email(author_entries);

    Ok(Self {
      id,
      title,
      publication_date,
      authors,
      corresponding_email,
      non_academic_authors: Vec::new(),
      company_affiliations: BTreeSet::new(),
    })
  }
}

/// Unwraps a field result, logging and substituting the neutral default on failure.
fn recover<T>(field: &str, result: Result<T>, default: impl FnOnce() -> T) -> T {
  result.unwrap_or_else(|e| {
    warn!("Field `{}` degraded to default: {}", field, e);
    default()
  })
}

/// Looks up `key` in a mapping, treating absence and `null` alike.
fn child<'a>(value: Option<&'a Value>, key: &'static str) -> Result<Option<&'a Value>> {
  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Object(map)) => Ok(map.get(key)),
    Some(other) =>
      Err(PubscoutError::shape(key, format!("parent is {} instead of a mapping", kind(other)))),
  }
}

/// Follows a path of keys, taking the first element wherever a mapping arrives as a sequence.
fn descend<'a>(value: Option<&'a Value>, path: &[&'static str]) -> Result<Option<&'a Value>> {
  let mut current = value;
  for key in path {
    let first = as_sequence(current).into_iter().next();
    current = child(first, *key)?;
  }
  Ok(current)
}

/// Reads the text of a leaf field.
///
/// Accepts plain strings and numbers, and unwraps a `$text` wrapper once.
fn text_of(value: Option<&Value>, field: &'static str) -> Result<String> {
  match value {
    None | Some(Value::Null) => Ok(String::new()),
    Some(Value::String(text)) => Ok(text.trim().to_string()),
    Some(Value::Number(number)) => Ok(number.to_string()),
    Some(Value::Object(map)) => match map.get(xml::TEXT_KEY) {
      Some(Value::String(text)) => Ok(text.trim().to_string()),
      Some(Value::Number(number)) => Ok(number.to_string()),
      Some(other) => Err(PubscoutError::shape(field, format!("wrapped {}", kind(other)))),
      None => Ok(String::new()),
    },
    Some(other) => Err(PubscoutError::shape(field, format!("{} instead of text", kind(other)))),
  }
}

/// Extracts the PMID.
fn extract_id(raw: &Value) -> Result<String> {
  text_of(descend(Some(raw), &["MedlineCitation", "PMID"])?, "PMID")
}

/// Extracts the article title.
fn extract_title(article: Option<&Value>) -> Result<String> {
  text_of(descend(article, &["ArticleTitle"])?, "ArticleTitle")
}

/// Extracts the publication date.
///
/// Joins year, month and day while each one is present, so a day never appears without a month.
/// Without a year, falls back to the first 19xx/20xx year found in `MedlineDate`.
fn extract_publication_date(article: Option<&Value>) -> Result<String> {
  let pub_date = descend(article, &PUB_DATE_PATH)?;
  let pub_date = as_sequence(pub_date).into_iter().next();

  let mut parts = Vec::new();
  for key in ["Year", "Month", "Day"] {
    let part = text_of(child(pub_date, key)?, key)?;
    if part.is_empty() {
      break;
    }
    parts.push(part);
  }
  if !parts.is_empty() {
    return Ok(parts.join("-"));
  }

  let medline_date = text_of(child(pub_date, "MedlineDate")?, "MedlineDate")?;
  Ok(YEAR.find(&medline_date).map(|m| m.as_str().to_string()).unwrap_or_default())
}

/// Extracts every author with a usable name, in source order.
///
/// A malformed author entry is skipped on its own; the remaining authors are kept.
fn extract_authors(entries: Option<&Value>) -> Vec<Author> {
  as_sequence(entries)
    .into_iter()
    .filter_map(|entry| match extract_author(entry) {
      Ok(author) => author,
      Err(e) => {
        warn!("Skipping author entry: {}", e);
        None
      },
    })
    .collect()
}

/// Builds one author, returning `None` when no name can be formed.
fn extract_author(entry: &Value) -> Result<Option<Author>> {
  let entry = Some(entry);
  let last_name = text_of(child(entry, "LastName")?, "LastName")?;
  let fore_name = text_of(child(entry, "ForeName")?, "ForeName")?;
  let initials = text_of(child(entry, "Initials")?, "Initials")?;

  let mut name = format!("{} {}", fore_name, last_name).trim().to_string();
  if name.is_empty() {
    name = format!("{} {}", initials, last_name).trim().to_string();
  }
  if name.is_empty() {
    trace!("Author entry without a name: {:?}", entry);
    return Ok(None);
  }

  let affiliations = recover("AffiliationInfo", extract_affiliations(entry), Vec::new);
  Ok(Some(Author { name, affiliations }))
}

/// Collects every non-empty affiliation text of one author.
///
/// A malformed `AffiliationInfo` entry is skipped on its own; the remaining ones are kept.
fn extract_affiliations(entry: Option<&Value>) -> Result<Vec<String>> {
  Ok(
    as_sequence(child(entry, "AffiliationInfo")?)
      .into_iter()
      .filter_map(|info| match affiliation_text(info) {
        Ok(text) if !text.is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
          warn!("Skipping affiliation entry: {}", e);
          None
        },
      })
      .collect(),
  )
}

/// Reads the `Affiliation` text of one `AffiliationInfo` entry.
fn affiliation_text(info: &Value) -> Result<String> {
  text_of(child(Some(info), "Affiliation")?, "Affiliation")
}

/// Returns the first email address found in the affiliations of the raw author entries, in
/// author then affiliation order.
///
/// Every entry is scanned, including ones that yield no author such as collective names.
fn find_email(entries: Option<&Value>) -> String {
  as_sequence(entries)
    .into_iter()
    .flat_map(|entry| extract_affiliations(Some(entry)).unwrap_or_default())
    .find_map(|affiliation| EMAIL.find(&affiliation).map(|m| m.as_str().to_string()))
    .unwrap_or_default()
}

/// Short description of a value's kind for log messages.
fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "a sequence",
    Value::Object(_) => "a mapping",
  }
}

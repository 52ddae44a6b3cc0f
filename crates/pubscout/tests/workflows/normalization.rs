use super::*;

#[traced_test]
#[test]
fn test_sample_articles_normalize() {
  let raw = articles_from_xml(EFETCH_SAMPLE);
  assert_eq!(raw.len(), 4);

  let papers = normalize_records(&raw);
  let ids: Vec<&str> = papers.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, vec!["38000001", "38000002", "38000003", "38000004"]);

  let first = &papers[0];
  assert_eq!(
    first.title,
    "Phase II trial of an oral KRAS G12C inhibitor in advanced solid tumours."
  );
  assert_eq!(first.publication_date, "2023-Jan-15");
  assert_eq!(first.authors.len(), 2);
  assert_eq!(first.authors[1].name, "Jane Roe");
  assert_eq!(first.authors[1].affiliations.len(), 2);
  assert_eq!(first.corresponding_email, "jane.roe@gene.com");
  assert!(first.non_academic_authors.is_empty());
  assert!(first.company_affiliations.is_empty());
}

#[traced_test]
#[test]
fn test_single_and_partial_shapes() {
  let papers = normalize_records(&articles_from_xml(EFETCH_SAMPLE));

  // Lone author and lone affiliation arrive as mappings rather than lists
  assert_eq!(papers[1].authors.len(), 1);
  assert_eq!(papers[1].authors[0].affiliations.len(), 1);
  assert_eq!(papers[1].publication_date, "2022");
  assert_eq!(papers[1].corresponding_email, "");

  // A missing forename leaves the last name alone; initials only stand in when no other name
  // part exists, and a collective author is skipped
  assert_eq!(papers[2].publication_date, "2024-Mar");
  let names: Vec<&str> = papers[2].authors.iter().map(|a| a.name.as_str()).collect();
  assert_eq!(names, vec!["Tanaka", "MK"]);
  assert!(papers[2].authors[1].affiliations.is_empty());
}

#[traced_test]
#[test]
fn test_degraded_author_list_keeps_record() {
  let papers = normalize_records(&articles_from_xml(EFETCH_SAMPLE));
  let editorial = &papers[3];
  assert_eq!(editorial.title, "Editorial.");
  assert!(editorial.authors.is_empty());
  assert_eq!(editorial.publication_date, "");
}

#[test]
fn test_non_mapping_records_are_dropped() {
  let raw = vec![Value::String("not an article".into()), Value::Null, Value::Bool(true)];
  assert!(normalize_records(&raw).is_empty());
}

use super::*;

#[traced_test]
#[tokio::test]
async fn test_find_industry_papers() -> TestResult<()> {
  let source = RecordedSource::with_ids(&["38000001", "38000002", "38000003", "38000004"]);
  let outcome = find_industry_papers(&source, "kras OR glp-1", 10).await?;

  assert_eq!(outcome.ids.len(), 4);
  assert_eq!(outcome.normalized, 4);

  let kept: Vec<&str> = outcome.papers.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(kept, vec!["38000001", "38000003"]);

  let kras = &outcome.papers[0];
  assert_eq!(kras.non_academic_authors, vec!["Jane Roe"]);
  assert_eq!(
    kras.company_affiliations,
    BTreeSet::from([
      "Genentech".to_string(),
      "Roche".to_string(),
      "Roche Diagnostics Gmbh".to_string()
    ])
  );

  let glp1 = &outcome.papers[1];
  assert_eq!(glp1.non_academic_authors, vec!["Tanaka"]);
  assert!(glp1.company_affiliations.contains("Takeda"));
  assert!(glp1.company_affiliations.contains("Takeda Pharmaceutical"));
  assert_eq!(glp1.corresponding_email, "k.tanaka@takeda.com");

  assert_eq!(source.fetched.lock().unwrap().len(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_empty_search_skips_fetch() -> TestResult<()> {
  let source = RecordedSource::default();
  let outcome = find_industry_papers(&source, "nothing matches this", 10).await?;

  assert!(outcome.ids.is_empty());
  assert_eq!(outcome.normalized, 0);
  assert!(outcome.papers.is_empty());
  assert!(source.fetched.lock().unwrap().is_empty());
  Ok(())
}

#[tokio::test]
async fn test_search_errors_propagate() {
  let result = find_industry_papers(&FailingSource, "anything", 10).await;
  assert!(matches!(result, Err(PubscoutError::ApiError(_))));
}

#[tokio::test]
async fn test_works_through_trait_object() -> TestResult<()> {
  let source: Box<dyn LiteratureSource> = Box::new(RecordedSource::with_ids(&["38000001"]));
  let outcome = find_industry_papers(source.as_ref(), "kras", 1).await?;
  assert_eq!(outcome.ids, vec!["38000001"]);
  // The recorded response always holds every sample article
  assert_eq!(outcome.papers.len(), 2);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_csv_export() -> TestResult<()> {
  let source = RecordedSource::with_ids(&["38000001", "38000003"]);
  let outcome = find_industry_papers(&source, "kras", 10).await?;

  let dir = tempdir()?;
  let path = dir.path().join("industry_papers.csv");
  output::write_to_file(&outcome.papers, &path)?;

  let mut reader = csv::Reader::from_path(&path)?;
  assert_eq!(reader.headers()?.iter().collect::<Vec<_>>(), output::HEADERS);

  let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
  assert_eq!(rows.len(), 2);
  assert_eq!(&rows[0][2], "2023-Jan-15");
  assert_eq!(&rows[0][3], "Jane Roe");
  assert_eq!(&rows[0][4], "Genentech; Roche; Roche Diagnostics Gmbh");
  assert_eq!(&rows[0][5], "jane.roe@gene.com");
  assert_eq!(&rows[1][0], "38000003");
  assert_eq!(&rows[1][4], "Takeda; Takeda Pharmaceutical; Takeda Pharmaceutical Company");

  assert_eq!(std::fs::read_to_string(&path)?, output::to_csv_string(&outcome.papers)?);
  Ok(())
}

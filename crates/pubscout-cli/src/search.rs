//! The search run behind `get-papers-list`.

use pubscout::output;

use super::*;

/// What to search for and where the results go.
#[derive(Debug, Clone)]
pub struct SearchOptions {
  /// PubMed query
  pub query:       String,
  /// Maximum number of ids requested
  pub max_results: usize,
  /// CSV destination; standard output when unset
  pub file:        Option<PathBuf>,
  /// Report each step as it starts
  pub debug:       bool,
}

/// Searches, fetches, filters, and writes the papers with industry authors.
///
/// Empty results at any stage end the run with a warning rather than an error.
pub async fn search<I, S>(interaction: &I, source: &S, options: SearchOptions) -> Result<()>
where
  I: UserInteraction,
  S: LiteratureSource + ?Sized,
{
  let SearchOptions { query, max_results, file, debug } = options;
  let step = |message: &str| {
    if debug {
      interaction.reply(ResponseContent::Info(message))
    } else {
      Ok(())
    }
  };

  interaction.reply(ResponseContent::Info(&format!("Searching PubMed for: {}", query)))?;
  step("Fetching and filtering papers from PubMed...")?;
  let PipelineOutcome { ids, normalized, papers } =
    find_industry_papers(source, &query, max_results).await?;
  if ids.is_empty() {
    return interaction.reply(ResponseContent::Warning("No papers found for the given query."));
  }
  interaction.reply(ResponseContent::Info(&format!("Found {} papers", ids.len())))?;

  if normalized == 0 {
    return interaction
      .reply(ResponseContent::Warning("No detailed paper information could be retrieved."));
  }
  interaction
    .reply(ResponseContent::Info(&format!("Retrieved details for {} papers", normalized)))?;

  if papers.is_empty() {
    interaction.reply(ResponseContent::Warning(
      "No papers found with pharmaceutical/biotech company authors.",
    ))?;
    interaction.reply(ResponseContent::Info("This could mean:"))?;
    interaction.reply(ResponseContent::Info("- No papers in the results have industry authors"))?;
    interaction.reply(ResponseContent::Info("- Author affiliation data is not available"))?;
    return interaction
      .reply(ResponseContent::Info("- Company detection patterns need refinement"));
  }
  interaction.reply(ResponseContent::Success(&format!(
    "Found {} papers with company affiliations",
    papers.len()
  )))?;

  match file {
    Some(path) => {
      step(&format!("Writing results to file: {}", path.display()))?;
      output::write_to_file(&papers, &path)?;
      interaction
        .reply(ResponseContent::Success(&format!("Results saved to {}", path.display())))?;

      let companies: BTreeSet<String> =
        papers.iter().flat_map(|paper| paper.company_affiliations.iter().cloned()).collect();
      if !companies.is_empty() {
        interaction.reply(ResponseContent::Companies(&companies))?;
      }
      Ok(())
    },
    None => {
      step("Writing results to console...")?;
      interaction.reply(ResponseContent::Papers(&papers))
    },
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use pubscout::{error::PubscoutError, xml::articles_from_xml};
  use serde_json::Value;

  use super::*;

  const ARTICLES: &str = r#"<PubmedArticleSet>
  <PubmedArticle><MedlineCitation><PMID>1</PMID><Article>
    <ArticleTitle>Industry trial</ArticleTitle>
    <AuthorList><Author><LastName>Smith</LastName><ForeName>John</ForeName>
      <AffiliationInfo><Affiliation>Pfizer Inc, New York, NY, USA</Affiliation></AffiliationInfo>
    </Author></AuthorList>
  </Article></MedlineCitation></PubmedArticle>
  <PubmedArticle><MedlineCitation><PMID>2</PMID><Article>
    <ArticleTitle>Academic study</ArticleTitle>
    <AuthorList><Author><LastName>Doe</LastName><ForeName>Jane</ForeName>
      <AffiliationInfo><Affiliation>University of Oxford, UK</Affiliation></AffiliationInfo>
    </Author></AuthorList>
  </Article></MedlineCitation></PubmedArticle>
</PubmedArticleSet>"#;

  const ACADEMIC_ONLY: &str = r#"<PubmedArticleSet>
  <PubmedArticle><MedlineCitation><PMID>3</PMID><Article>
    <ArticleTitle>Basic science</ArticleTitle>
    <AuthorList><Author><LastName>Roe</LastName><Initials>R</Initials>
      <AffiliationInfo><Affiliation>Harvard Medical School, Boston, MA</Affiliation>
      </AffiliationInfo>
    </Author></AuthorList>
  </Article></MedlineCitation></PubmedArticle>
</PubmedArticleSet>"#;

  /// Serves canned ids and records.
  struct FixedSource {
    ids: Vec<String>,
    xml: &'static str,
  }

  #[async_trait::async_trait]
  impl LiteratureSource for FixedSource {
    async fn search(
      &self,
      _query: &str,
      max_results: usize,
    ) -> pubscout::error::Result<Vec<String>> {
      Ok(self.ids.iter().take(max_results).cloned().collect())
    }

    async fn fetch_records(&self, _ids: &[String]) -> pubscout::error::Result<Vec<Value>> {
      Ok(articles_from_xml(self.xml))
    }
  }

  /// Fails every search.
  struct BrokenSource;

  #[async_trait::async_trait]
  impl LiteratureSource for BrokenSource {
    async fn search(
      &self,
      _query: &str,
      _max_results: usize,
    ) -> pubscout::error::Result<Vec<String>> {
      Err(PubscoutError::ApiError("backend unavailable".to_string()))
    }

    async fn fetch_records(&self, _ids: &[String]) -> pubscout::error::Result<Vec<Value>> {
      unreachable!()
    }
  }

  /// Records every reply as a line of text.
  #[derive(Default)]
  struct Recorder(Mutex<Vec<String>>);

  impl UserInteraction for Recorder {
    fn reply(&self, content: ResponseContent) -> Result<()> {
      let line = match content {
        ResponseContent::Info(m) => format!("info: {m}"),
        ResponseContent::Success(m) => format!("success: {m}"),
        ResponseContent::Warning(m) => format!("warning: {m}"),
        ResponseContent::Papers(papers) => format!("papers: {}", output::to_csv_string(papers)?),
        ResponseContent::Companies(companies) =>
          format!("companies: {}", companies.iter().cloned().collect::<Vec<_>>().join(", ")),
      };
      self.0.lock().unwrap().push(line);
      Ok(())
    }
  }

  impl Recorder {
    fn lines(&self) -> Vec<String> { self.0.lock().unwrap().clone() }
  }

  fn options(file: Option<PathBuf>) -> SearchOptions {
    SearchOptions { query: "trial".to_string(), max_results: 10, file, debug: false }
  }

  fn source() -> FixedSource {
    FixedSource { ids: vec!["1".to_string(), "2".to_string()], xml: ARTICLES }
  }

  #[tokio::test]
  async fn test_prints_csv_to_console() {
    let recorder = Recorder::default();
    search(&recorder, &source(), options(None)).await.unwrap();

    let lines = recorder.lines();
    assert!(lines.contains(&"info: Found 2 papers".to_string()));
    assert!(lines.contains(&"success: Found 1 papers with company affiliations".to_string()));
    let csv = lines.last().unwrap();
    assert!(csv.starts_with("papers: PubmedID,Title"));
    assert!(csv.contains("1,Industry trial,,John Smith,Pfizer; Pfizer Inc,"));
    assert!(!csv.contains("Academic study"));
  }

  #[tokio::test]
  async fn test_writes_file_and_lists_companies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let recorder = Recorder::default();
    search(&recorder, &source(), options(Some(path.clone()))).await.unwrap();

    assert!(std::fs::read_to_string(&path).unwrap().contains("Industry trial"));
    assert_eq!(recorder.lines().last().unwrap(), "companies: Pfizer, Pfizer Inc");
  }

  #[tokio::test]
  async fn test_empty_stages_warn() {
    let recorder = Recorder::default();
    let empty = FixedSource { ids: Vec::new(), xml: ARTICLES };
    search(&recorder, &empty, options(None)).await.unwrap();
    assert_eq!(recorder.lines().last().unwrap(), "warning: No papers found for the given query.");

    let recorder = Recorder::default();
    let no_details = FixedSource { ids: vec!["9".to_string()], xml: "<PubmedArticleSet/>" };
    search(&recorder, &no_details, options(None)).await.unwrap();
    assert_eq!(
      recorder.lines().last().unwrap(),
      "warning: No detailed paper information could be retrieved."
    );

    let recorder = Recorder::default();
    let academic_only = FixedSource { ids: vec!["3".to_string()], xml: ACADEMIC_ONLY };
    search(&recorder, &academic_only, options(None)).await.unwrap();
    let lines = recorder.lines();
    assert!(lines.contains(&"info: Retrieved details for 1 papers".to_string()));
    assert!(lines.contains(
      &"warning: No papers found with pharmaceutical/biotech company authors.".to_string()
    ));
    assert!(!lines.iter().any(|line| line.starts_with("papers:")));
  }

  #[tokio::test]
  async fn test_debug_reports_steps() {
    let recorder = Recorder::default();
    let options = SearchOptions { debug: true, ..options(None) };
    search(&recorder, &source(), options).await.unwrap();
    let lines = recorder.lines();
    assert!(lines.contains(&"info: Fetching and filtering papers from PubMed...".to_string()));
    assert!(lines.contains(&"info: Writing results to console...".to_string()));
  }

  /// Counts the calls that reach it while serving canned records.
  #[derive(Default)]
  struct CountingSource {
    searches: Mutex<usize>,
    fetches:  Mutex<usize>,
  }

  #[async_trait::async_trait]
  impl LiteratureSource for CountingSource {
    async fn search(
      &self,
      _query: &str,
      _max_results: usize,
    ) -> pubscout::error::Result<Vec<String>> {
      *self.searches.lock().unwrap() += 1;
      Ok(vec!["1".to_string(), "2".to_string()])
    }

    async fn fetch_records(&self, _ids: &[String]) -> pubscout::error::Result<Vec<Value>> {
      *self.fetches.lock().unwrap() += 1;
      Ok(articles_from_xml(ARTICLES))
    }
  }

  #[tokio::test]
  async fn test_matches_library_pipeline() {
    let recorder = Recorder::default();
    let counting = CountingSource::default();
    search(&recorder, &counting, options(None)).await.unwrap();
    assert_eq!(*counting.searches.lock().unwrap(), 1);
    assert_eq!(*counting.fetches.lock().unwrap(), 1);

    let outcome = find_industry_papers(&source(), "trial", 10).await.unwrap();
    let expected = format!("papers: {}", output::to_csv_string(&outcome.papers).unwrap());
    assert_eq!(recorder.lines().last().unwrap(), &expected);
  }

  #[tokio::test]
  async fn test_source_errors_propagate() {
    let recorder = Recorder::default();
    let result = search(&recorder, &BrokenSource, options(None)).await;
    assert!(matches!(result, Err(CliError::Pubscout(PubscoutError::ApiError(_)))));
  }
}

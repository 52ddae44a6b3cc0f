//! PubMed retrieval through the NCBI E-utilities API.
//!
//! Retrieval happens in two steps: `esearch` turns a query into a list of PubMed ids, then
//! `efetch` returns the full article XML for those ids in batches. Batches are paced so that the
//! client stays within NCBI's request-rate guidance.
//!
//! Anything that goes wrong here (transport errors, non-success statuses, undecodable JSON)
//! propagates to the caller. Record-level problems inside a successful response do not: they are
//! absorbed by the [`normalize`](crate::normalize) module.
//!
//! # Examples
//!
//! ```no_run
//! use pubscout::retriever::{LiteratureSource, PubMedClient, RetrieverConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PubMedClient::new(RetrieverConfig::default())?;
//! let ids = client.search("alzheimer AND pharmaceutical", 20).await?;
//! let records = client.fetch_records(&ids).await?;
//! println!("Fetched {} raw records", records.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{Client, Request};
use url::Url;

use super::*;
use crate::{filter::PaperFilter, normalize::normalize_records};

/// Default E-utilities endpoint.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Settings for [`PubMedClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
  /// Base URL of the E-utilities service
  pub base_url:         String,
  /// Contact email passed to NCBI
  pub email:            Option<String>,
  /// NCBI API key for higher rate limits
  pub api_key:          Option<String>,
  /// Number of ids per `efetch` request
  pub batch_size:       usize,
  /// Pause between consecutive `efetch` requests, in milliseconds
  pub request_pause_ms: u64,
  /// Per-request timeout, in seconds
  pub timeout_secs:     u64,
}

impl Default for RetrieverConfig {
  fn default() -> Self {
    Self {
      base_url:         DEFAULT_BASE_URL.to_string(),
      email:            None,
      api_key:          None,
      batch_size:       200,
      request_pause_ms: 500,
      timeout_secs:     30,
    }
  }
}

/// A source of raw bibliographic records.
///
/// [`PubMedClient`] is the real implementation; tests and offline tools can provide their own.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
  /// Runs a search and returns matching record ids in the order the source ranks them.
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

  /// Fetches the raw records for a list of ids, one nested value per article.
  async fn fetch_records(&self, ids: &[String]) -> Result<Vec<Value>>;
}

/// Client for the PubMed `esearch` and `efetch` endpoints.
#[derive(Debug, Clone)]
pub struct PubMedClient {
  /// Settings this client was built with
  config:   RetrieverConfig,
  /// Base URL, normalized to end in `/`
  base_url: Url,
  /// Shared HTTP client
  client:   Client,
}

impl PubMedClient {
  /// Creates a client, validating the base URL.
  pub fn new(config: RetrieverConfig) -> Result<Self> {
    if config.batch_size == 0 {
      return Err(PubscoutError::Config("batch_size must be at least 1".to_string()));
    }
    let base = if config.base_url.ends_with('/') {
      config.base_url.clone()
    } else {
      format!("{}/", config.base_url)
    };
    let base_url = Url::parse(&base)?;
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { config, base_url, client })
  }

  /// The settings this client was built with.
  pub fn config(&self) -> &RetrieverConfig { &self.config }

  /// Parameters shared by every request.
  fn credentials(&self) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(email) = &self.config.email {
      params.push(("email", email.clone()));
    }
    if let Some(api_key) = &self.config.api_key {
      params.push(("api_key", api_key.clone()));
    }
    params
  }

  /// Builds the `esearch` request for a query.
  pub fn search_request(&self, query: &str, max_results: usize) -> Result<Request> {
    let url = self.base_url.join("esearch.fcgi")?;
    let mut params = vec![
      ("db", "pubmed".to_string()),
      ("term", query.to_string()),
      ("retmax", max_results.to_string()),
      ("retmode", "json".to_string()),
      ("usehistory", "y".to_string()),
    ];
    params.extend(self.credentials());
    Ok(self.client.get(url).query(&params).build()?)
  }

  /// Builds the `efetch` request for one batch of ids.
  pub fn fetch_request(&self, ids: &[String]) -> Result<Request> {
    let url = self.base_url.join("efetch.fcgi")?;
    let mut params = vec![
      ("db", "pubmed".to_string()),
      ("id", ids.join(",")),
      ("retmode", "xml".to_string()),
      ("rettype", "abstract".to_string()),
    ];
    params.extend(self.credentials());
    Ok(self.client.get(url).query(&params).build()?)
  }

  /// Sends one `efetch` request and returns its article records.
  async fn fetch_batch(&self, ids: &[String]) -> Result<Vec<Value>> {
    let request = self.fetch_request(ids)?;
    debug!("Fetching {} records via: {}", ids.len(), request.url());
    let body = self.client.execute(request).await?.error_for_status()?.text().await?;
    trace!("efetch response: {}", body);
    Ok(xml::articles_from_xml(&body))
  }
}

#[async_trait]
impl LiteratureSource for PubMedClient {
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
    let request = self.search_request(query, max_results)?;
    debug!("Searching PubMed via: {}", request.url());
    let body = self.client.execute(request).await?.error_for_status()?.bytes().await?;
    let ids = ids_from_search(&serde_json::from_slice(&body)?)?;
    info!("Found {} papers for query: {}", ids.len(), query);
    Ok(ids)
  }

  async fn fetch_records(&self, ids: &[String]) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    let batches: Vec<&[String]> = ids.chunks(self.config.batch_size).collect();
    for (index, batch) in batches.iter().enumerate() {
      records.extend(self.fetch_batch(batch).await?);
      if index + 1 < batches.len() {
        tokio::time::sleep(Duration::from_millis(self.config.request_pause_ms)).await;
      }
    }
    Ok(records)
  }
}

/// Reads the id list out of an `esearch` JSON response.
///
/// A response without an `esearchresult` is treated as "no hits"; an `ERROR` entry is an error.
pub fn ids_from_search(response: &Value) -> Result<Vec<String>> {
  let result = &response["esearchresult"];
  if let Some(message) = result["ERROR"].as_str().or_else(|| response["error"].as_str()) {
    return Err(PubscoutError::ApiError(message.to_string()));
  }
  Ok(
    normalize::as_sequence(result.get("idlist"))
      .into_iter()
      .filter_map(|id| match id {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
      })
      .collect(),
  )
}

/// What one end-to-end run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutcome {
  /// Ids returned by the search
  pub ids:        Vec<String>,
  /// Number of records that survived normalization
  pub normalized: usize,
  /// Papers with at least one industry-affiliated author
  pub papers:     Vec<PaperRecord>,
}

/// Searches, fetches, normalizes, and filters in one go.
///
/// The fetch step is skipped when the search finds nothing.
pub async fn find_industry_papers<S>(
  source: &S,
  query: &str,
  max_results: usize,
) -> Result<PipelineOutcome>
where
  S: LiteratureSource + ?Sized,
{
  let ids = source.search(query, max_results).await?;
  if ids.is_empty() {
    return Ok(PipelineOutcome::default());
  }

  let raw = source.fetch_records(&ids).await?;
  let normalized = normalize_records(&raw);
  let count = normalized.len();
  let papers = PaperFilter::default().filter(normalized);
  info!("{} of {} retrieved papers have industry authors", papers.len(), count);

  Ok(PipelineOutcome { ids, normalized: count, papers })
}

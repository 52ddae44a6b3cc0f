//! Configuration loaded from TOML.
//!
//! ```toml
//! max_results = 100
//!
//! [retriever]
//! email = "me@example.org"
//! api_key = "0123456789abcdef"
//! batch_size = 200
//! request_pause_ms = 500
//! ```
//!
//! Every key is optional. Command-line flags take precedence over values read here.

use super::*;
use crate::retriever::RetrieverConfig;

/// Default number of search hits requested from PubMed.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// How many PubMed ids a search asks for
  pub max_results: usize,
  /// Settings for the E-utilities client
  pub retriever:   RetrieverConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self { max_results: DEFAULT_MAX_RESULTS, retriever: RetrieverConfig::default() }
  }
}

impl Config {
  /// Returns the default location of the configuration file.
  ///
  /// - On Linux: `~/.config/pubscout/config.toml`
  /// - On macOS: `~/Library/Application Support/pubscout/config.toml`
  /// - On Windows: `%APPDATA%\pubscout\config.toml`
  /// - Fallback: `./pubscout/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("pubscout").join("config.toml")
  }

  /// Loads a configuration file, falling back to defaults when the file does not exist.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!("No config at {}, using defaults", path.display());
      return Ok(Self::default());
    }
    let content = std::fs::read_to_string(path)?;
    Self::from_toml(&content)
  }

  /// Parses a configuration from a TOML string.
  pub fn from_toml(toml_str: &str) -> Result<Self> {
    let config: Config = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
  }

  /// Rejects settings the retriever cannot work with.
  pub fn validate(&self) -> Result<()> {
    if self.retriever.batch_size == 0 {
      return Err(PubscoutError::Config("retriever.batch_size must be at least 1".to_string()));
    }
    if self.max_results == 0 {
      return Err(PubscoutError::Config("max_results must be at least 1".to_string()));
    }
    Ok(())
  }

  /// Sets the contact email sent with every request.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.retriever.email = Some(email.into());
    self
  }

  /// Sets the NCBI API key sent with every request.
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.retriever.api_key = Some(api_key.into());
    self
  }

  /// Sets the number of search hits to request.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }
}

//! Run configuration.
//!
//! A [`Config`] names the query file, the category files and how answers are
//! measured and rendered. It loads from JSON, or from TOML with the `toml`
//! feature, and every loader validates before returning.

use crate::compute::distance::{DistanceMetric, DistanceUnit};
use crate::error::{NearfindError, Result};
use crate::report::{MAX_PRECISION, OutputFormat};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A category name and the CSV file its locations come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySource {
    pub name: String,
    pub path: PathBuf,
}

impl CategorySource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Configuration for one batch run.
///
/// # Example
///
/// ```rust
/// use nearfind::config::Config;
/// use nearfind::DistanceUnit;
///
/// let json = r#"{
///     "queries": "queries.csv",
///     "unit": "kilometers",
///     "categories": [{ "name": "COFFEE", "path": "coffee.csv" }]
/// }"#;
/// let config = Config::from_json(json)?;
/// assert_eq!(config.unit, DistanceUnit::Kilometers);
/// assert_eq!(config.precision, 2);
/// # Ok::<(), nearfind::NearfindError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Query CSV path
    #[serde(default = "Config::default_queries")]
    pub queries: PathBuf,

    #[serde(default)]
    pub metric: DistanceMetric,

    #[serde(default)]
    pub unit: DistanceUnit,

    /// Decimal places for distances in reports (0-10, default: 2)
    #[serde(default = "Config::default_precision")]
    pub precision: usize,

    #[serde(default)]
    pub format: OutputFormat,

    /// Pivot seed; `None` draws one from OS entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Worker threads for answering queries
    #[serde(default = "Config::default_workers")]
    pub workers: usize,

    /// Categories in report order
    #[serde(default = "Config::default_categories")]
    pub categories: Vec<CategorySource>,
}

impl Config {
    fn default_queries() -> PathBuf {
        PathBuf::from("Queries.csv")
    }

    const fn default_precision() -> usize {
        2
    }

    const fn default_workers() -> usize {
        1
    }

    fn default_categories() -> Vec<CategorySource> {
        vec![
            CategorySource::new("STARBUCKS", "StarbucksData.csv"),
            CategorySource::new("WHATABURGER", "WhataburgerData.csv"),
        ]
    }

    pub fn with_queries<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.queries = path.into();
        self
    }

    /// Replaces the category list.
    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = CategorySource>,
    {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Appends one category after those already configured.
    pub fn with_category(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.categories.push(CategorySource::new(name, path));
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(invalid("at least one category is required"));
        }

        let mut seen = FxHashSet::default();
        for source in &self.categories {
            if source.name.is_empty() {
                return Err(invalid("category name must not be empty"));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(invalid(format!("duplicate category name: {}", source.name)));
            }
        }

        if self.precision > MAX_PRECISION {
            return Err(invalid(format!(
                "precision must be between 0 and {MAX_PRECISION}, got {}",
                self.precision
            )));
        }

        if self.workers == 0 {
            return Err(invalid("workers must be greater than zero"));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| invalid(e.to_string()))
    }

    /// Reads a configuration file, choosing the format by extension.
    ///
    /// `.toml` files need the `toml` feature; anything else is parsed as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| NearfindError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            Self::parse_toml(&content)?
        } else {
            Self::from_json(&content)?
        };
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    #[cfg(feature = "toml")]
    fn parse_toml(content: &str) -> Result<Self> {
        Self::from_toml(content)
    }

    #[cfg(not(feature = "toml"))]
    fn parse_toml(_content: &str) -> Result<Self> {
        Err(invalid("TOML configuration requires the `toml` feature"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queries: Self::default_queries(),
            metric: DistanceMetric::default(),
            unit: DistanceUnit::default(),
            precision: Self::default_precision(),
            format: OutputFormat::default(),
            seed: None,
            workers: Self::default_workers(),
            categories: Self::default_categories(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> NearfindError {
    NearfindError::InvalidConfig(msg.into())
}

//! Request defaults loaded from configuration.
//!
//! Applications usually want the same page size, result attributes and sort
//! order for most of their searches. [`SearchConfig`] holds those defaults
//! and can be read from YAML or JSON:
//!
//! ```yaml
//! page_size: 50
//! attributes: [name, qualifiedName]
//! sort:
//!   - field: __timestamp
//!     order: desc
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SearchError};
use crate::ordering::SortItem;
use crate::request::DEFAULT_PAGE_SIZE;

/// Defaults applied when building requests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Number of results per page (`size` on the wire).
    pub page_size: u32,
    /// Attributes to return for every result.
    pub attributes: Vec<String>,
    /// Sort order applied when a request sets none.
    pub sort: Vec<SortItem>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            page_size: DEFAULT_PAGE_SIZE,
            attributes: Vec::new(),
            sort: Vec::new(),
        }
    }
}

impl SearchConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: SearchConfig =
            serde_yaml::from_str(s).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()
    }

    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SearchConfig =
            serde_json::from_str(s).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()
    }

    /// Reads a configuration file, choosing the format by extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading search config");
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(SearchError::Config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    fn validate(self) -> Result<Self> {
        if self.page_size == 0 {
            tracing::warn!("rejecting search config with page_size 0");
            return Err(SearchError::Config("page_size must be at least 1".into()));
        }
        if let Some(item) = self.sort.iter().find(|item| item.field.trim().is_empty()) {
            tracing::warn!(order = %item.order, "rejecting sort item without a field");
            return Err(SearchError::Config("sort items require a field".into()));
        }
        Ok(self)
    }
}

//! Explorer configuration.

use explorer_query::MAX_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Default search node URL.
pub const DEFAULT_SEARCH_NODE: &str = "http://localhost:9200";

/// Default page size when a request carries no limit.
pub const DEFAULT_MAX_PAGE_SIZE: usize = MAX_PAGE_SIZE;

/// Environment variable holding the search node URL.
pub const SEARCH_NODE_ENV: &str = "OPENSEARCH_NODE";

/// Environment variable holding the default page size.
pub const MAX_PAGE_SIZE_ENV: &str = "EXPLORER_MAX_PAGE_SIZE";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse JSON configuration.
    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Page size is not a number.
    #[error("invalid {var}: {0:?} is not a number", var = MAX_PAGE_SIZE_ENV)]
    InvalidPageSize(String),

    /// Page size outside `1..=MAX_PAGE_SIZE`.
    #[error("max page size must be between 1 and {max}, got {0}", max = MAX_PAGE_SIZE)]
    PageSizeOutOfRange(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// URL of the search cluster node.
    #[serde(default = "default_search_node")]
    pub search_node: String,

    /// Page size applied to listings requested without a limit.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            search_node: DEFAULT_SEARCH_NODE.to_string(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

fn default_search_node() -> String {
    DEFAULT_SEARCH_NODE.to_string()
}

const fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

impl ExplorerConfig {
    /// Reads `OPENSEARCH_NODE` and `EXPLORER_MAX_PAGE_SIZE`; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(node) = lookup(SEARCH_NODE_ENV) {
            config.search_node = node;
        }
        if let Some(raw) = lookup(MAX_PAGE_SIZE_ENV) {
            config.max_page_size = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPageSize(raw.clone()))?;
        }
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_page_size == 0 || self.max_page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeOutOfRange(self.max_page_size));
        }
        Ok(self)
    }
}

// Error types for plugscope

use thiserror::Error;

/// Unified error type for plugscope operations
///
/// This is the primary error type returned by the library.
/// Individual error types are exposed through `From` conversions.
#[derive(Debug, Error)]
pub enum PlugscopeError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Health lookup failed: {0}")]
    Health(#[from] HealthLookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Catalog query failures (search API)
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out after {0} seconds. Please check your connection and try again.")]
    Timeout(u64),

    /// 4xx responses. Never retried.
    #[error("HTTP {status}: {reason}")]
    Client { status: u16, reason: String },

    #[error("HTTP {status}: {reason}")]
    Server { status: u16, reason: String },

    #[error("API Error: {0}")]
    Api(String),

    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error("Failed to fetch plugin data after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Whether the retry loop may try again after this failure
    pub fn is_retriable(&self) -> bool {
        !matches!(self, CatalogError::Client { .. } | CatalogError::Exhausted { .. })
    }
}

/// Per-item health lookup failures
///
/// Any of these degrades a single item to "unavailable"; other items are unaffected.
#[derive(Debug, Clone, Error)]
pub enum HealthLookupError {
    #[error("Health lookup for '{slug}' timed out")]
    Timeout { slug: String },

    #[error("Health runtime unavailable")]
    RuntimeUnavailable,

    #[error("Request timed out")]
    RequestTimeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("API Error: {0}")]
    Api(String),

    #[error("Unable to calculate health score: {0}")]
    Lookup(String),
}

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

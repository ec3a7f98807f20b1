// Directory catalog client - searches the plugin directory with retry and caching

use super::cache::SearchCache;
use super::types::{QueryResponse, QUERY_FIELDS};
use super::CatalogSource;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::PluginRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Exponential backoff between catalog attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base: Duration::from_millis(config.backoff_base_ms),
            cap: Duration::from_millis(config.backoff_cap_ms),
        }
    }

    /// Delay after the given 1-based failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base.saturating_mul(factor).min(self.cap)
    }
}

/// Plugin directory catalog client
///
/// This client provides methods to:
/// - Search the directory by free-text term
/// - Retry transient failures with capped exponential backoff
/// - Serve repeated searches from a short-lived cache
pub struct DirectoryCatalogClient {
    /// HTTP client
    client: Client,

    /// Catalog configuration
    config: CatalogConfig,

    retry: RetryPolicy,

    cache: SearchCache,
}

impl DirectoryCatalogClient {
    /// Create a new catalog client with default configuration
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create a new catalog client with a specific configuration
    pub fn with_config(config: CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            retry: RetryPolicy::from_config(&config),
            cache: SearchCache::new(config.cache_ttl()),
            config,
        }
    }

    /// Search the directory by keyword
    ///
    /// Fresh cached answers are returned without a request. Client errors
    /// (4xx) fail immediately; everything else is retried per the retry policy.
    pub async fn search(&self, term: &str) -> Result<Vec<PluginRecord>, CatalogError> {
        if let Some(cached) = self.cache.get(term) {
            tracing::debug!(term, "using cached catalog results");
            return Ok(cached.as_ref().clone());
        }
        tracing::debug!(term, "catalog cache miss");

        let mut attempt = 1;
        loop {
            match self.query_once(term).await {
                Ok(records) => {
                    tracing::debug!(term, count = records.len(), attempt, "catalog query succeeded");
                    return Ok(self.cache.insert(term, records).as_ref().clone());
                }
                Err(err) => {
                    tracing::warn!(term, attempt, error = %err, "catalog fetch attempt failed");

                    if !err.is_retriable() {
                        return Err(err);
                    }
                    if attempt >= self.retry.max_attempts {
                        return Err(match err {
                            CatalogError::Timeout(_) => err,
                            other => CatalogError::Exhausted {
                                attempts: attempt,
                                last: Box::new(other),
                            },
                        });
                    }

                    let delay = self.retry.delay_for(attempt);
                    tracing::debug!(term, ?delay, "retrying catalog query");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Single request without retry or caching
    async fn query_once(&self, term: &str) -> Result<Vec<PluginRecord>, CatalogError> {
        let response = self
            .client
            .get(self.query_url(term))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout(self.config.timeout_secs)
                } else {
                    CatalogError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(CatalogError::Client {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Client Error").to_string(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::Server {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Server Error").to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout(self.config.timeout_secs)
            } else {
                CatalogError::RequestFailed(format!("Failed to read response: {}", e))
            }
        })?;

        let parsed: QueryResponse = serde_json::from_str(&body).map_err(|e| {
            CatalogError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        match parsed {
            QueryResponse {
                plugins: Some(plugins),
                ..
            } => Ok(plugins),
            QueryResponse {
                error: Some(message),
                ..
            } => Err(CatalogError::Api(message)),
            _ => {
                tracing::warn!(term, "unexpected catalog response format");
                Ok(vec![])
            }
        }
    }

    /// Query URL for a search term
    pub fn query_url(&self, term: &str) -> String {
        let mut url = format!(
            "{}/plugins/info/1.2/?action=query_plugins&request[search]={}&request[per_page]={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(term),
            self.config.per_page
        );
        for field in QUERY_FIELDS {
            url.push_str(&format!("&request[fields][{}]=true", field));
        }
        url
    }

    /// Get the catalog configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }
}

impl Default for DirectoryCatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for DirectoryCatalogClient {
    async fn query(&self, term: &str) -> Result<Vec<PluginRecord>, CatalogError> {
        self.search(term).await
    }
}

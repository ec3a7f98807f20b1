// Catalog - plugin directory search integration

pub mod cache;
pub mod client;
pub mod types;

pub use cache::SearchCache;
pub use client::{DirectoryCatalogClient, RetryPolicy};
pub use types::{QueryInfo, QueryResponse};

use crate::error::CatalogError;
use crate::model::PluginRecord;
use async_trait::async_trait;

/// Anything that can answer a free-text plugin search
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn query(&self, term: &str) -> Result<Vec<PluginRecord>, CatalogError>;
}

/// Search the directory
///
/// This is a convenience function that uses the default catalog configuration.
pub async fn search_plugins(term: &str) -> Result<Vec<PluginRecord>, CatalogError> {
    let client = DirectoryCatalogClient::new();
    client.search(term).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_module_exports_types() {
        let client = DirectoryCatalogClient::new();
        assert_eq!(client.config().base_url, "https://api.wordpress.org");
        assert_eq!(client.config().per_page, 50);
    }
}

// Health detail client - per-plugin information and support forum lookups

use super::support::support_percent;
use super::HealthSource;
use crate::config::HealthConfig;
use crate::error::HealthLookupError;
use crate::scoring::HealthDetail;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Subset of a `plugin_information` response used for health scoring
#[derive(Debug, Deserialize)]
struct PluginInformation {
    #[serde(default)]
    last_updated: Option<String>,

    #[serde(default)]
    active_installs: Option<u64>,

    #[serde(default)]
    error: Option<String>,
}

/// Fetches the inputs of the authoritative health score for one plugin
pub struct DirectoryHealthClient {
    client: Client,
    config: HealthConfig,
}

impl DirectoryHealthClient {
    pub fn new() -> Self {
        Self::with_config(HealthConfig::default())
    }

    pub fn with_config(config: HealthConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Last update and install count from the plugin information API
    pub async fn plugin_info(&self, slug: &str) -> Result<(Option<String>, u64), HealthLookupError> {
        let url = format!(
            "{}/plugins/info/1.2/?action=plugin_information&request[slug]={}",
            self.config.api_base_url.trim_end_matches('/'),
            urlencoding::encode(slug)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HealthLookupError::RequestTimeout
                } else {
                    HealthLookupError::Lookup(format!("HTTP request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(HealthLookupError::Status(response.status().as_u16()));
        }

        let info: PluginInformation = response.json().await.map_err(|e| {
            HealthLookupError::Lookup(format!("Invalid plugin information received: {}", e))
        })?;

        if let Some(message) = info.error {
            return Err(HealthLookupError::Api(message));
        }

        Ok((info.last_updated, info.active_installs.unwrap_or(0)))
    }

    /// Resolved support thread percentage; 0 whenever the page can't be read
    pub async fn support_percent(&self, slug: &str) -> f64 {
        let url = format!(
            "{}/{}/",
            self.config.support_base_url.trim_end_matches('/'),
            urlencoding::encode(slug)
        );

        let response = match self.client.get(&url).header("Accept", "text/html").send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::warn!(slug, "support page request timed out");
                return 0.0;
            }
            Err(e) => {
                tracing::warn!(slug, error = %e, "error fetching support page");
                return 0.0;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(slug, status = response.status().as_u16(), "failed to fetch support page");
            return 0.0;
        }

        match response.text().await {
            Ok(html) => support_percent(&html),
            Err(e) => {
                tracing::warn!(slug, error = %e, "failed to read support page");
                0.0
            }
        }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }
}

impl Default for DirectoryHealthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthSource for DirectoryHealthClient {
    async fn detail(&self, slug: &str) -> Result<HealthDetail, HealthLookupError> {
        let (last_updated, active_installs) = self.plugin_info(slug).await?;
        let support_percent = self.support_percent(slug).await;

        Ok(HealthDetail {
            last_updated,
            active_installs,
            support_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_config(server: &mockito::Server) -> HealthConfig {
        HealthConfig {
            api_base_url: server.url(),
            support_base_url: format!("{}/support/plugin", server.url()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn detail_combines_info_and_support_page() {
        let mut server = mockito::Server::new_async().await;
        let info = server
            .mock("GET", "/plugins/info/1.2/")
            .match_query(Matcher::UrlEncoded("action".into(), "plugin_information".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "slug": "akismet",
                    "last_updated": "2025-08-13 9:37am GMT",
                    "active_installs": 5000000
                })
                .to_string(),
            )
            .create_async()
            .await;
        let support = server
            .mock("GET", "/support/plugin/akismet/")
            .with_status(200)
            .with_body("<p>9 of 10 support threads in the last two months have been resolved.</p>")
            .create_async()
            .await;

        let client = DirectoryHealthClient::with_config(test_config(&server));
        let detail = client.detail("akismet").await.unwrap();

        assert_eq!(detail.last_updated.as_deref(), Some("2025-08-13 9:37am GMT"));
        assert_eq!(detail.active_installs, 5_000_000);
        assert!((detail.support_percent - 90.0).abs() < 1e-9);
        info.assert_async().await;
        support.assert_async().await;
    }

    #[tokio::test]
    async fn missing_support_page_counts_as_zero() {
        let mut server = mockito::Server::new_async().await;
        let _info = server
            .mock("GET", "/plugins/info/1.2/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"last_updated": "2024-01-01 1:00pm GMT", "active_installs": 900}"#)
            .create_async()
            .await;
        let _support = server
            .mock("GET", "/support/plugin/tiny/")
            .with_status(500)
            .create_async()
            .await;

        let client = DirectoryHealthClient::with_config(test_config(&server));
        let detail = client.detail("tiny").await.unwrap();
        assert_eq!(detail.support_percent, 0.0);
        assert_eq!(detail.active_installs, 900);
    }

    #[tokio::test]
    async fn api_error_fails_the_lookup() {
        let mut server = mockito::Server::new_async().await;
        let _info = server
            .mock("GET", "/plugins/info/1.2/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error": "Plugin not found."}"#)
            .create_async()
            .await;

        let client = DirectoryHealthClient::with_config(test_config(&server));
        let err = client.detail("ghost").await.unwrap_err();
        assert!(matches!(err, HealthLookupError::Api(ref m) if m == "Plugin not found."));
    }

    #[tokio::test]
    async fn http_error_fails_the_lookup() {
        let mut server = mockito::Server::new_async().await;
        let _info = server
            .mock("GET", "/plugins/info/1.2/")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = DirectoryHealthClient::with_config(test_config(&server));
        assert!(matches!(
            client.detail("down").await,
            Err(HealthLookupError::Status(502))
        ));
    }
}

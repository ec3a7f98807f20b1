// Health - authoritative per-plugin health lookups

pub mod board;
pub mod client;
pub mod service;
pub mod support;

pub use board::{HealthBoard, HealthStatus};
pub use client::DirectoryHealthClient;
pub use service::{HealthHandle, HealthReply, HealthRequest, HealthService};
pub use support::support_percent;

use crate::error::HealthLookupError;
use crate::scoring::{HealthDetail, HealthScoreResult};
use async_trait::async_trait;
use chrono::Utc;

/// Anything that can fetch the inputs of a health score for one slug
#[async_trait]
pub trait HealthSource: Send + Sync {
    async fn detail(&self, slug: &str) -> Result<HealthDetail, HealthLookupError>;
}

/// Fetch and score one plugin's health
///
/// This is a convenience function that uses the default health configuration.
pub async fn plugin_health(slug: &str) -> Result<HealthScoreResult, HealthLookupError> {
    let client = DirectoryHealthClient::new();
    let detail = client.detail(slug).await?;
    Ok(HealthScoreResult::from_detail(slug, &detail, Utc::now()))
}

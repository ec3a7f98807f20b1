// Scoring - pure, deterministic scoring functions
//
// Nothing in here performs I/O or reads the clock; callers pass `now`.

pub mod date;
pub mod health;
pub mod proxy;
pub mod usability;

pub use health::{HealthBreakdown, HealthDetail, HealthRaw, HealthScoreResult, HealthTier};
pub use proxy::ProxyBreakdown;
pub use usability::{UsabilityColor, UsabilityResult};

use crate::config::ScoringConfig;
use crate::model::PluginRecord;
use chrono::{DateTime, Utc};

/// Usability result for a record's own histogram and rating count
pub fn usability_of(record: &PluginRecord, config: &ScoringConfig) -> UsabilityResult {
    usability::score(record.ratings.as_ref(), record.num_ratings, config)
}

/// Proxy health score for a record
pub fn health_proxy_of(record: &PluginRecord, now: DateTime<Utc>) -> u8 {
    proxy::score(record, now)
}

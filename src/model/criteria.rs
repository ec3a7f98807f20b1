// Filter criteria and sort keys supplied by the caller per filter application

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result ordering
///
/// Unknown names fall back to [`SortKey::LastUpdated`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SortKey {
    /// Newest update first
    #[default]
    LastUpdated,

    /// Highest stars first, then most ratings
    Rating,

    /// Most installs first
    ActiveInstalls,

    /// Highest usability score first, then most ratings
    UsabilityScore,

    /// Highest health proxy first
    HealthScore,

    /// Case-insensitive A-Z
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::LastUpdated,
        SortKey::Rating,
        SortKey::ActiveInstalls,
        SortKey::UsabilityScore,
        SortKey::HealthScore,
        SortKey::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::LastUpdated => "last_updated",
            SortKey::Rating => "rating",
            SortKey::ActiveInstalls => "active_installs",
            SortKey::UsabilityScore => "usability_score",
            SortKey::HealthScore => "health_score",
            SortKey::Name => "name",
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value.trim())
            .unwrap_or_default()
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::from(value.as_str())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds a record must meet to stay in the result set
///
/// Built fresh for every filter application and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Minimum stars (0.0 - 5.0)
    pub min_rating: f64,

    /// Minimum active installs
    pub min_installs: u64,

    /// Maximum days since the last update; `None` is unbounded
    pub max_days: Option<u32>,

    pub sort_by: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_rating: 0.0,
            min_installs: 0,
            max_days: None,
            sort_by: SortKey::LastUpdated,
        }
    }
}

impl FilterCriteria {
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating.clamp(0.0, 5.0);
        self
    }

    pub fn with_min_installs(mut self, min_installs: u64) -> Self {
        self.min_installs = min_installs;
        self
    }

    pub fn with_max_days(mut self, max_days: Option<u32>) -> Self {
        self.max_days = max_days;
        self
    }

    pub fn with_sort(mut self, sort_by: SortKey) -> Self {
        self.sort_by = sort_by;
        self
    }
}

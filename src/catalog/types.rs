// Catalog API types - directory query response structures

use crate::model::PluginRecord;
use serde::{Deserialize, Serialize};

/// Fields requested from the directory for every search
pub const QUERY_FIELDS: [&str; 8] = [
    "short_description",
    "rating",
    "ratings",
    "active_installs",
    "last_updated",
    "icons",
    "num_ratings",
    "tested",
];

/// Body of a `query_plugins` response
///
/// The directory answers with either a plugin list or an error message; any
/// other shape is treated as "no results".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub info: Option<QueryInfo>,

    #[serde(default)]
    pub plugins: Option<Vec<PluginRecord>>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Paging information attached to a query response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryInfo {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub pages: u32,

    #[serde(default)]
    pub results: u64,
}

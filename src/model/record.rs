// Plugin record types - one catalog entry as returned by the directory API

use scraper::Html;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One plugin directory entry
///
/// Snapshots are immutable once fetched; every scoring and pipeline stage
/// borrows them. Missing or `null` numeric fields deserialize as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    /// Unique identifier (e.g., "contact-form-7")
    pub slug: String,

    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Short description
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,

    /// Rating on the directory's 0-100 scale
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,

    /// Star histogram (1..=5 -> count)
    #[serde(default)]
    pub ratings: Option<RatingHistogram>,

    /// Total number of ratings as reported by the directory
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_ratings: u64,

    /// Active installs, bucketed by the directory
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_installs: u64,

    /// Last update in the directory's "YYYY-MM-DD H:MMam GMT" format
    #[serde(default)]
    pub last_updated: Option<String>,

    /// Highest platform version the plugin declares compatibility with
    #[serde(default)]
    pub tested: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub icons: Icons,

    /// Author, possibly wrapped in an HTML link
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
}

impl PluginRecord {
    /// Create a record with only an identifier and name set
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            short_description: String::new(),
            rating: 0.0,
            ratings: None,
            num_ratings: 0,
            active_installs: 0,
            last_updated: None,
            tested: None,
            icons: Icons::default(),
            author: String::new(),
        }
    }

    /// Rating converted to 0-5 stars
    pub fn stars(&self) -> f64 {
        self.rating / 20.0
    }

    /// Author name with any HTML markup removed and entities decoded
    pub fn author_name(&self) -> String {
        let text: String = Html::parse_fragment(&self.author)
            .root_element()
            .text()
            .collect();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            "Unknown".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Icon URLs keyed by density
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icons {
    #[serde(rename = "1x", default)]
    pub standard: Option<String>,

    #[serde(rename = "2x", default)]
    pub retina: Option<String>,

    #[serde(default)]
    pub svg: Option<String>,

    #[serde(default)]
    pub default: Option<String>,
}

impl Icons {
    /// Highest-resolution icon available
    pub fn best(&self) -> Option<&str> {
        self.retina
            .as_deref()
            .or(self.svg.as_deref())
            .or(self.standard.as_deref())
            .or(self.default.as_deref())
    }
}

/// Star rating histogram
///
/// Only stars 1 through 5 are meaningful; other keys are kept but ignored
/// by every calculation. Missing stars count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RatingHistogram(BTreeMap<u8, u64>);

impl RatingHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from counts for 1 through 5 stars
    pub fn from_counts(counts: [u64; 5]) -> Self {
        Self(
            counts
                .iter()
                .enumerate()
                .map(|(i, &c)| ((i + 1) as u8, c))
                .collect(),
        )
    }

    pub fn with(mut self, star: u8, count: u64) -> Self {
        self.0.insert(star, count);
        self
    }

    /// Count for a star value, 0 if absent
    pub fn count(&self, star: u8) -> u64 {
        self.0.get(&star).copied().unwrap_or(0)
    }

    /// Number of ratings across stars 1..=5
    pub fn total(&self) -> u64 {
        (1..=5).map(|star| self.count(star)).sum()
    }

    /// Sum of star * count across stars 1..=5
    pub fn weighted_sum(&self) -> u64 {
        (1..=5u8).map(|star| u64::from(star) * self.count(star)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

}

impl<'de> Deserialize<'de> for RatingHistogram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The directory sends `[]` instead of `{}` for plugins without ratings.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Map(BTreeMap<String, Option<u64>>),
            List(Vec<Option<u64>>),
        }

        let map = match Wire::deserialize(deserializer)? {
            Wire::Map(entries) => entries
                .into_iter()
                .filter_map(|(k, v)| Some((k.trim().parse::<u8>().ok()?, v.unwrap_or(0))))
                .collect(),
            Wire::List(counts) => counts
                .into_iter()
                .enumerate()
                .take(5)
                .map(|(i, c)| ((i + 1) as u8, c.unwrap_or(0)))
                .collect(),
        };
        Ok(Self(map))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Result sorter - one stable total order per sort key

use crate::config::ScoringConfig;
use crate::model::{PluginRecord, SortKey};
use crate::scoring::{self, date};
use chrono::{DateTime, Utc};
use feruca::Collator;
use std::cmp::Ordering;

/// Precomputed comparison key for one record
enum Rank {
    Updated(DateTime<Utc>),
    Stars(f64, u64),
    Installs(u64),
    Usability(f64, u64),
    Health(u8),
    Name(String),
}

impl Rank {
    fn of(record: &PluginRecord, key: SortKey, now: DateTime<Utc>, scoring: &ScoringConfig) -> Self {
        match key {
            SortKey::LastUpdated => Rank::Updated(date::normalize(record.last_updated.as_deref())),
            SortKey::Rating => Rank::Stars(record.stars(), record.num_ratings),
            SortKey::ActiveInstalls => Rank::Installs(record.active_installs),
            SortKey::UsabilityScore => {
                Rank::Usability(scoring::usability_of(record, scoring).score, record.num_ratings)
            }
            SortKey::HealthScore => Rank::Health(scoring::health_proxy_of(record, now)),
            SortKey::Name => Rank::Name(record.name.to_lowercase()),
        }
    }

    fn compare(&self, other: &Self, collator: &mut Collator) -> Ordering {
        match (self, other) {
            (Rank::Updated(a), Rank::Updated(b)) => b.cmp(a),
            (Rank::Stars(a, an), Rank::Stars(b, bn)) => b.total_cmp(a).then(bn.cmp(an)),
            (Rank::Installs(a), Rank::Installs(b)) => b.cmp(a),
            (Rank::Usability(a, an), Rank::Usability(b, bn)) => b.total_cmp(a).then(bn.cmp(an)),
            (Rank::Health(a), Rank::Health(b)) => b.cmp(a),
            (Rank::Name(a), Rank::Name(b)) => collator.collate(a.as_str(), b.as_str()),
            _ => Ordering::Equal,
        }
    }
}

/// Sorted copy of `records`. Ties keep their input order.
pub fn sort(
    records: &[PluginRecord],
    key: SortKey,
    now: DateTime<Utc>,
    scoring: &ScoringConfig,
) -> Vec<PluginRecord> {
    let mut ranked: Vec<(Rank, &PluginRecord)> = records
        .iter()
        .map(|record| (Rank::of(record, key, now, scoring), record))
        .collect();

    // Unicode collation (CLDR root) on lowercased names
    let mut collator = Collator::default();
    ranked.sort_by(|(a, _), (b, _)| a.compare(b, &mut collator));
    ranked.into_iter().map(|(_, record)| record.clone()).collect()
}

// Health proxy - synchronous approximation from fields already in the search result
//
// Sorting cannot wait for per-plugin network lookups, so the `health_score`
// sort key ranks by this proxy. The badge shows the authoritative score, and
// the two can disagree.

use super::date;
use crate::model::PluginRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proxy sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyBreakdown {
    /// 0-40
    pub recency: u8,
    /// 0-30
    pub rating: u8,
    /// 5-20
    pub installs: u8,
    /// 2-10
    pub compatibility: u8,
}

impl ProxyBreakdown {
    pub fn total(&self) -> u8 {
        (u16::from(self.recency)
            + u16::from(self.rating)
            + u16::from(self.installs)
            + u16::from(self.compatibility))
        .min(100) as u8
    }
}

/// Proxy health score for a record, clamped to 0-100
pub fn score(record: &PluginRecord, now: DateTime<Utc>) -> u8 {
    breakdown(record, now).total()
}

pub fn breakdown(record: &PluginRecord, now: DateTime<Utc>) -> ProxyBreakdown {
    let updated = date::normalize(record.last_updated.as_deref());
    ProxyBreakdown {
        recency: recency_score(date::days_since_floor(updated, now)),
        rating: rating_score(record.stars(), record.num_ratings),
        installs: install_score(record.active_installs),
        compatibility: compat_score(record.tested.as_deref().unwrap_or("")),
    }
}

fn recency_score(days: i64) -> u8 {
    match days {
        ..=30 => 40,
        31..=90 => 30,
        91..=180 => 20,
        181..=365 => 10,
        _ => 0,
    }
}

// A perfect rating from a handful of reviews must not beat a near-perfect one from hundreds.
fn rating_score(stars: f64, num_ratings: u64) -> u8 {
    if stars >= 4.5 && num_ratings >= 50 {
        30
    } else if stars >= 4.0 && num_ratings >= 20 {
        25
    } else if stars >= 3.5 && num_ratings >= 10 {
        20
    } else if stars >= 3.0 && num_ratings >= 5 {
        15
    } else if stars >= 2.0 {
        10
    } else {
        0
    }
}

fn install_score(installs: u64) -> u8 {
    match installs {
        1_000_000.. => 20,
        100_000.. => 17,
        10_000.. => 14,
        1_000.. => 11,
        100.. => 8,
        _ => 5,
    }
}

/// Compatibility bonus from the declared tested-up-to version.
///
/// Compares version strings lexicographically, which only orders correctly
/// while major and minor components stay single digits ("10.0" < "6.0").
fn compat_score(tested: &str) -> u8 {
    if tested >= "6.0" {
        10
    } else if tested >= "5.8" {
        8
    } else if tested >= "5.5" {
        6
    } else if tested >= "5.0" {
        4
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn stamp(days_ago: i64) -> String {
        (now() - Duration::days(days_ago))
            .format("%Y-%m-%d %-I:%M%P GMT")
            .to_string()
    }

    #[test]
    fn worked_example_terms() {
        let mut record = PluginRecord::new("forms", "Forms");
        record.active_installs = 500_000;
        record.last_updated = Some(stamp(40));
        record.rating = 92.0;
        record.num_ratings = 60;
        record.tested = Some("6.4.2".to_string());

        let b = breakdown(&record, now());
        assert_eq!(b.recency, 30);
        assert_eq!(b.rating, 30);
        assert_eq!(b.installs, 17);
        assert_eq!(b.compatibility, 10);
        assert_eq!(score(&record, now()), 87);
    }

    #[test]
    fn recency_thresholds() {
        assert_eq!(recency_score(0), 40);
        assert_eq!(recency_score(30), 40);
        assert_eq!(recency_score(31), 30);
        assert_eq!(recency_score(90), 30);
        assert_eq!(recency_score(180), 20);
        assert_eq!(recency_score(365), 10);
        assert_eq!(recency_score(366), 0);
    }

    #[test]
    fn rating_needs_sample_size() {
        assert_eq!(rating_score(5.0, 1), 10);
        assert_eq!(rating_score(4.5, 500), 30);
        assert_eq!(rating_score(4.5, 49), 25);
        assert_eq!(rating_score(4.0, 19), 20);
        assert_eq!(rating_score(3.5, 9), 15);
        assert_eq!(rating_score(3.0, 4), 10);
        assert_eq!(rating_score(1.9, 1000), 0);
    }

    #[test]
    fn install_tiers() {
        assert_eq!(install_score(0), 5);
        assert_eq!(install_score(100), 8);
        assert_eq!(install_score(1_000), 11);
        assert_eq!(install_score(10_000), 14);
        assert_eq!(install_score(100_000), 17);
        assert_eq!(install_score(1_000_000), 20);
    }

    #[test]
    fn compat_is_lexicographic() {
        assert_eq!(compat_score("6.8"), 10);
        assert_eq!(compat_score("5.9"), 8);
        assert_eq!(compat_score("5.6.1"), 6);
        assert_eq!(compat_score("5.0"), 4);
        assert_eq!(compat_score("4.9"), 2);
        assert_eq!(compat_score(""), 2);
        // known limitation of string ordering
        assert_eq!(compat_score("10.0"), 2);
    }

    #[test]
    fn unknown_record_gets_floor_scores() {
        let record = PluginRecord::new("empty", "Empty");
        let b = breakdown(&record, now());
        assert_eq!(b, ProxyBreakdown { recency: 0, rating: 0, installs: 5, compatibility: 2 });
        assert_eq!(score(&record, now()), 7);
    }

    #[test]
    fn maximum_is_100() {
        let mut record = PluginRecord::new("best", "Best");
        record.active_installs = 5_000_000;
        record.last_updated = Some(stamp(1));
        record.rating = 100.0;
        record.num_ratings = 1_000;
        record.tested = Some("6.8".to_string());
        assert_eq!(score(&record, now()), 100);
    }
}

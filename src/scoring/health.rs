// Authoritative health score - update recency, support responsiveness, install scale

use super::date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw per-plugin inputs fetched from the health detail API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDetail {
    /// Last update in the directory's timestamp format
    pub last_updated: Option<String>,

    pub active_installs: u64,

    /// Share of recent support threads marked resolved, 0-100
    pub support_percent: f64,
}

/// Named sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    /// 0-30
    pub update: u8,
    /// 0-30
    pub support: u8,
    /// 10-40
    pub installs: u8,
}

impl HealthBreakdown {
    pub fn total(&self) -> u8 {
        self.update + self.support + self.installs
    }
}

/// Inputs echoed back alongside the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRaw {
    pub last_updated: Option<String>,
    pub active_installs: u64,
    /// Rounded to a whole percent
    pub support_percent: u8,
}

/// Health score for one plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreResult {
    pub slug: String,
    pub health_score: u8,
    pub breakdown: HealthBreakdown,
    pub raw: HealthRaw,
}

impl HealthScoreResult {
    /// Score fetched details for `slug` as of `now`
    pub fn from_detail(slug: impl Into<String>, detail: &HealthDetail, now: DateTime<Utc>) -> Self {
        let updated = date::normalize(detail.last_updated.as_deref());
        let breakdown = calculate(updated, detail.active_installs, detail.support_percent, now);

        Self {
            slug: slug.into(),
            health_score: breakdown.total(),
            breakdown,
            raw: HealthRaw {
                last_updated: detail.last_updated.clone(),
                active_installs: detail.active_installs,
                support_percent: detail.support_percent.clamp(0.0, 100.0).round() as u8,
            },
        }
    }

    pub fn tier(&self) -> HealthTier {
        HealthTier::for_score(self.health_score)
    }
}

/// Compute the three sub-scores. Pure; no I/O.
pub fn calculate(
    last_updated: DateTime<Utc>,
    active_installs: u64,
    support_percent: f64,
    now: DateTime<Utc>,
) -> HealthBreakdown {
    HealthBreakdown {
        update: update_score(date::months_since(last_updated, now)),
        support: support_score(support_percent),
        installs: install_score(active_installs),
    }
}

fn update_score(months: f64) -> u8 {
    if months <= 6.0 {
        30
    } else if months <= 12.0 {
        20
    } else if months <= 24.0 {
        10
    } else {
        0
    }
}

fn support_score(percent: f64) -> u8 {
    if percent >= 80.0 {
        30
    } else if percent >= 50.0 {
        20
    } else if percent >= 20.0 {
        10
    } else {
        0
    }
}

// Any listed plugin gets the 10 point floor.
fn install_score(installs: u64) -> u8 {
    match installs {
        1_000_000.. => 40,
        100_000.. => 30,
        10_000.. => 20,
        _ => 10,
    }
}

/// Badge bucket for an authoritative health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Green,
    Yellow,
    Red,
}

impl HealthTier {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => HealthTier::Green,
            50.. => HealthTier::Yellow,
            _ => HealthTier::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Green => "green",
            HealthTier::Yellow => "yellow",
            HealthTier::Red => "red",
        }
    }
}

/// Battery glyph shown next to a health score
pub fn meter(score: u8) -> &'static str {
    if score >= 60 {
        "🔋"
    } else {
        "🪫"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn fresh_popular_well_supported_plugin_scores_100() {
        let breakdown = calculate(now() - Duration::days(10), 5_000_000, 95.0, now());
        assert_eq!(breakdown, HealthBreakdown { update: 30, support: 30, installs: 40 });
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn update_recency_uses_30_day_months() {
        let at = |days| calculate(now() - Duration::days(days), 0, 0.0, now()).update;
        assert_eq!(at(180), 30);
        assert_eq!(at(181), 20);
        assert_eq!(at(360), 20);
        assert_eq!(at(361), 10);
        assert_eq!(at(720), 10);
        assert_eq!(at(721), 0);
    }

    #[test]
    fn support_thresholds() {
        assert_eq!(support_score(80.0), 30);
        assert_eq!(support_score(79.9), 20);
        assert_eq!(support_score(50.0), 20);
        assert_eq!(support_score(20.0), 10);
        assert_eq!(support_score(19.9), 0);
    }

    #[test]
    fn install_floor_is_ten() {
        assert_eq!(install_score(0), 10);
        assert_eq!(install_score(9_999), 10);
        assert_eq!(install_score(10_000), 20);
        assert_eq!(install_score(100_000), 30);
        assert_eq!(install_score(1_000_000), 40);
    }

    #[test]
    fn unknown_date_is_maximally_stale() {
        let detail = HealthDetail {
            last_updated: Some("not a date".to_string()),
            active_installs: 200_000,
            support_percent: 66.6,
        };
        let result = HealthScoreResult::from_detail("stale", &detail, now());

        assert_eq!(result.breakdown.update, 0);
        assert_eq!(result.health_score, 50);
        assert_eq!(result.raw.support_percent, 67);
        assert_eq!(result.raw.last_updated.as_deref(), Some("not a date"));
        assert_eq!(result.tier(), HealthTier::Yellow);
    }

    #[test]
    fn total_stays_in_bounds() {
        for days in [0, 100, 400, 1000, 20_000] {
            for installs in [0, 50_000, 10_000_000] {
                for support in [0.0, 35.0, 100.0] {
                    let b = calculate(now() - Duration::days(days), installs, support, now());
                    assert!(b.update <= 30 && b.support <= 30);
                    assert!((10..=40).contains(&b.installs));
                    assert!(b.total() <= 100);
                }
            }
        }
    }

    #[test]
    fn tiers_and_meter() {
        assert_eq!(HealthTier::for_score(80), HealthTier::Green);
        assert_eq!(HealthTier::for_score(79), HealthTier::Yellow);
        assert_eq!(HealthTier::for_score(50), HealthTier::Yellow);
        assert_eq!(HealthTier::for_score(49), HealthTier::Red);
        assert_eq!(meter(60), "🔋");
        assert_eq!(meter(59), "🪫");
    }
}

// Criteria filter - AND of rating, install and recency thresholds

use crate::model::{FilterCriteria, PluginRecord};
use crate::scoring::date;
use chrono::{DateTime, Utc};

/// Whether a record meets every threshold in `criteria`
pub fn matches(record: &PluginRecord, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    let passes_rating = record.stars() >= criteria.min_rating;
    let passes_installs = record.active_installs >= criteria.min_installs;
    let passes_days = match criteria.max_days {
        None => true,
        Some(max_days) => {
            let updated = date::normalize(record.last_updated.as_deref());
            date::days_since_ceil(updated, now) <= i64::from(max_days)
        }
    };

    passes_rating && passes_installs && passes_days
}

/// Records that meet `criteria`, in input order
pub fn filter(
    records: &[PluginRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<PluginRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria, now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn record(slug: &str, rating: f64, installs: u64, days_ago: i64) -> PluginRecord {
        let mut record = PluginRecord::new(slug, slug);
        record.rating = rating;
        record.active_installs = installs;
        record.last_updated = Some(
            (now() - Duration::days(days_ago))
                .format("%Y-%m-%d %-I:%M%P GMT")
                .to_string(),
        );
        record
    }

    fn sample() -> Vec<PluginRecord> {
        vec![
            record("old-popular", 90.0, 2_000_000, 400),
            record("fresh-small", 70.0, 100, 5),
            record("mid", 84.0, 20_000, 60),
            record("unrated", 0.0, 10, 10),
        ]
    }

    fn slugs(records: &[PluginRecord]) -> Vec<&str> {
        records.iter().map(|r| r.slug.as_str()).collect()
    }

    #[test]
    fn default_criteria_keep_everything() {
        let kept = filter(&sample(), &FilterCriteria::default(), now());
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn thresholds_are_and_combined() {
        let criteria = FilterCriteria::default()
            .with_min_rating(4.0)
            .with_min_installs(10_000)
            .with_max_days(Some(90));
        assert_eq!(slugs(&filter(&sample(), &criteria, now())), vec!["mid"]);
    }

    #[test]
    fn rating_threshold_uses_stars() {
        let criteria = FilterCriteria::default().with_min_rating(4.5);
        assert_eq!(slugs(&filter(&sample(), &criteria, now())), vec!["old-popular"]);
    }

    #[test]
    fn partial_days_round_up() {
        let mut almost = record("edge", 80.0, 1_000, 30);
        almost.last_updated = Some(
            (now() - Duration::days(30) - Duration::hours(1))
                .format("%Y-%m-%d %-I:%M%P GMT")
                .to_string(),
        );
        let criteria = FilterCriteria::default().with_max_days(Some(30));
        assert!(!matches(&almost, &criteria, now()));
        assert!(matches(&record("edge", 80.0, 1_000, 30), &criteria, now()));
    }

    #[test]
    fn unknown_dates_fail_any_bounded_age() {
        let mut undated = record("undated", 100.0, 1_000_000, 0);
        undated.last_updated = Some("soon".to_string());

        assert!(matches(&undated, &FilterCriteria::default(), now()));
        let criteria = FilterCriteria::default().with_max_days(Some(365));
        assert!(!matches(&undated, &criteria, now()));
    }

    #[test]
    fn tightening_never_grows_the_set() {
        let records = sample();
        let mut previous = usize::MAX;
        for min_rating in [0.0, 3.5, 4.2, 4.5, 5.0] {
            let kept = filter(&records, &FilterCriteria::default().with_min_rating(min_rating), now()).len();
            assert!(kept <= previous);
            previous = kept;
        }

        let mut previous = usize::MAX;
        for max_days in [3650, 365, 90, 30, 1] {
            let criteria = FilterCriteria::default().with_max_days(Some(max_days));
            let kept = filter(&records, &criteria, now()).len();
            assert!(kept <= previous);
            previous = kept;
        }
    }
}

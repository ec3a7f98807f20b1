// Pipeline - filter, sort and paginate fetched plugin records

pub mod filter;
pub mod paginate;
pub mod session;
pub mod sort;

pub use paginate::Page;
pub use session::{FilterSession, RefreshOutcome};

use crate::config::ScoringConfig;
use crate::model::{FilterCriteria, PluginRecord};
use chrono::{DateTime, Utc};

/// Filter, sort and slice `records` in one pass
///
/// This is a convenience function for one-shot use; [`FilterSession`] keeps
/// the intermediate results around for re-sorting and paging.
pub fn run(
    records: &[PluginRecord],
    criteria: &FilterCriteria,
    page_size: usize,
    page: usize,
    now: DateTime<Utc>,
    scoring: &ScoringConfig,
) -> Page<PluginRecord> {
    let kept = filter::filter(records, criteria, now);
    let sorted = sort::sort(&kept, criteria.sort_by, now, scoring);
    paginate::paginate(&sorted, page_size, page)
}

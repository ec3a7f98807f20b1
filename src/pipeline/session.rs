// Filter session - owned state for one search: fetched records, filtered view, page

use super::{filter, paginate, sort, Page};
use crate::catalog::CatalogSource;
use crate::config::{PipelineConfig, ScoringConfig};
use crate::error::CatalogError;
use crate::model::{FilterCriteria, PluginRecord, SortKey};
use chrono::{DateTime, Utc};

/// What a refresh did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New records were fetched and the session now shows them
    Applied { fetched: usize, filtered: usize },

    /// The catalog answered with nothing; previous results are still shown
    NoResults,
}

/// Stateful filter/sort/paginate controller
///
/// Every view operation works from the state held here; nothing is global.
/// Replacing the record set is all-or-nothing: a failed refresh leaves the
/// previous records, filtered view and page untouched.
#[derive(Debug, Clone)]
pub struct FilterSession {
    fetched: Vec<PluginRecord>,
    filtered: Vec<PluginRecord>,
    criteria: FilterCriteria,
    current_page: usize,
    page_size: usize,
    scoring: ScoringConfig,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new(&PipelineConfig::default(), ScoringConfig::default())
    }
}

impl FilterSession {
    pub fn new(pipeline: &PipelineConfig, scoring: ScoringConfig) -> Self {
        Self {
            fetched: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            current_page: 1,
            page_size: pipeline.page_size.max(1),
            scoring,
        }
    }

    /// Replace the record set, filter and sort it, and go back to page 1
    pub fn apply(
        &mut self,
        records: Vec<PluginRecord>,
        criteria: FilterCriteria,
        now: DateTime<Utc>,
    ) -> Page<PluginRecord> {
        let kept = filter::filter(&records, &criteria, now);
        let sorted = sort::sort(&kept, criteria.sort_by, now, &self.scoring);
        tracing::info!(
            fetched = records.len(),
            filtered = sorted.len(),
            sort = %criteria.sort_by,
            "applied filters"
        );

        self.fetched = records;
        self.filtered = sorted;
        self.criteria = criteria;
        self.current_page = 1;
        self.current_page()
    }

    /// Re-sort the filtered set by `key` and go back to page 1
    ///
    /// Does nothing when there are no filtered results.
    pub fn resort(&mut self, key: SortKey, now: DateTime<Utc>) -> Option<Page<PluginRecord>> {
        if self.filtered.is_empty() {
            tracing::debug!(sort = %key, "nothing to re-sort");
            return None;
        }

        self.filtered = sort::sort(&self.filtered, key, now, &self.scoring);
        self.criteria.sort_by = key;
        self.current_page = 1;
        tracing::debug!(sort = %key, count = self.filtered.len(), "re-sorted results");
        Some(self.current_page())
    }

    /// Move to page `n`, clamped into `[1, total_pages]`
    pub fn go_to_page(&mut self, n: usize) -> Page<PluginRecord> {
        let last = paginate::total_pages(self.filtered.len(), self.page_size);
        self.current_page = n.clamp(1, last);
        tracing::debug!(requested = n, page = self.current_page, "changed page");
        self.current_page()
    }

    pub fn current_page(&self) -> Page<PluginRecord> {
        paginate::paginate(&self.filtered, self.page_size, self.current_page)
    }

    /// Drop filtered results and reset criteria to defaults
    ///
    /// Fetched records are kept so filters can be re-applied without a new fetch.
    pub fn clear(&mut self) {
        self.filtered.clear();
        self.criteria = FilterCriteria::default();
        self.current_page = 1;
        tracing::debug!("cleared filters");
    }

    /// Human-readable summary of the current page
    pub fn status_line(&self) -> String {
        let page = self.current_page();
        format!(
            "Showing {} of {} filtered plugins (page {} of {})",
            page.items.len(),
            page.total_results,
            page.page,
            page.total_pages
        )
    }

    /// Fetch `term` from `source` and apply `criteria` to the answer
    ///
    /// On a fetch error or an empty answer the session keeps its previous state.
    pub async fn refresh<S>(
        &mut self,
        source: &S,
        term: &str,
        criteria: FilterCriteria,
        now: DateTime<Utc>,
    ) -> Result<RefreshOutcome, CatalogError>
    where
        S: CatalogSource + ?Sized,
    {
        let records = source.query(term).await?;
        if records.is_empty() {
            tracing::info!(term, "no plugins found");
            return Ok(RefreshOutcome::NoResults);
        }

        let fetched = records.len();
        self.apply(records, criteria, now);
        Ok(RefreshOutcome::Applied {
            fetched,
            filtered: self.filtered.len(),
        })
    }

    pub fn fetched(&self) -> &[PluginRecord] {
        &self.fetched
    }

    pub fn filtered(&self) -> &[PluginRecord] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page_number(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

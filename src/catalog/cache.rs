// Search result cache - successful catalog answers kept for a fixed time

use crate::model::PluginRecord;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Entry {
    stored_at: Instant,
    records: Arc<Vec<PluginRecord>>,
}

/// Time-bounded cache keyed by search term
pub struct SearchCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(term: &str) -> String {
        format!("search:{term}")
    }

    /// Fresh records for `term`, if any
    pub fn get(&self, term: &str) -> Option<Arc<Vec<PluginRecord>>> {
        self.get_at(term, Instant::now())
    }

    fn get_at(&self, term: &str, now: Instant) -> Option<Arc<Vec<PluginRecord>>> {
        let mut entries = self.entries.lock();
        let key = Self::key(term);
        match entries.get(&key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(Arc::clone(&entry.records))
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a successful answer, dropping entries that have already expired
    pub fn insert(&self, term: &str, records: Vec<PluginRecord>) -> Arc<Vec<PluginRecord>> {
        self.insert_at(term, records, Instant::now())
    }

    fn insert_at(&self, term: &str, records: Vec<PluginRecord>, now: Instant) -> Arc<Vec<PluginRecord>> {
        let records = Arc::new(records);
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
        entries.insert(
            Self::key(term),
            Entry {
                stored_at: now,
                records: Arc::clone(&records),
            },
        );
        records
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = SearchCache::new(Duration::from_secs(300));
        cache.insert("forms", vec![PluginRecord::new("cf7", "Contact Form 7")]);

        let hit = cache.get("forms").unwrap();
        assert_eq!(hit[0].slug, "cf7");
        assert!(cache.get("seo").is_none());
    }

    #[test]
    fn expired_entries_are_dropped() {
        let cache = SearchCache::new(Duration::from_secs(300));
        cache.insert("forms", vec![]);

        let later = Instant::now() + Duration::from_secs(301);
        assert!(cache.get_at("forms", later).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_prunes_other_expired_terms() {
        let cache = SearchCache::new(Duration::from_secs(300));
        let start = Instant::now();
        cache.insert_at("forms", vec![], start);
        cache.insert_at("seo", vec![], start + Duration::from_secs(100));

        cache.insert_at("backup", vec![], start + Duration::from_secs(350));
        assert_eq!(cache.len(), 2);
        assert!(cache.get_at("forms", start + Duration::from_secs(350)).is_none());
        assert!(cache.get_at("seo", start + Duration::from_secs(350)).is_some());
    }

    #[test]
    fn terms_are_cached_separately() {
        let cache = SearchCache::new(Duration::from_secs(300));
        cache.insert("", vec![PluginRecord::new("a", "A")]);
        cache.insert("seo", vec![PluginRecord::new("b", "B")]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("").unwrap()[0].slug, "a");

        cache.clear();
        assert!(cache.is_empty());
    }
}

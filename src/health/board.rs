// Health board - per-slug health state for the currently shown page

use super::service::HealthReply;
use crate::scoring::HealthScoreResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Where one plugin's authoritative health score stands
#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    Pending,
    Ready(HealthScoreResult),
    Unavailable(String),
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, HealthStatus::Ready(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, HealthStatus::Unavailable(_))
    }

    pub fn result(&self) -> Option<&HealthScoreResult> {
        match self {
            HealthStatus::Ready(result) => Some(result),
            _ => None,
        }
    }
}

/// Thread-safe map of slug to health status
///
/// Only slugs on the tracked page accept replies; anything else is stale and
/// ignored.
#[derive(Debug, Default)]
pub struct HealthBoard {
    slots: Mutex<HashMap<String, HealthStatus>>,
}

impl HealthBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the board to a new page of slugs
    ///
    /// Ready results for slugs still shown are kept. Everything else starts
    /// out Pending. Returns the slugs that still need a lookup.
    pub fn track_page<I, S>(&self, slugs: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = self.slots.lock();
        let mut next = HashMap::new();
        let mut needed = Vec::new();

        for slug in slugs {
            let slug = slug.as_ref();
            if next.contains_key(slug) {
                continue;
            }
            match slots.remove(slug) {
                Some(ready @ HealthStatus::Ready(_)) => {
                    next.insert(slug.to_string(), ready);
                }
                _ => {
                    next.insert(slug.to_string(), HealthStatus::Pending);
                    needed.push(slug.to_string());
                }
            }
        }

        *slots = next;
        needed
    }

    /// Record a lookup reply. Returns false when the slug is no longer tracked.
    pub fn apply(&self, reply: HealthReply) -> bool {
        let mut slots = self.slots.lock();
        let Some(slot) = slots.get_mut(&reply.slug) else {
            tracing::debug!(id = %reply.id, slug = %reply.slug, "dropping stale health reply");
            return false;
        };

        *slot = match reply.result {
            Ok(result) => HealthStatus::Ready(result),
            Err(e) => HealthStatus::Unavailable(e.to_string()),
        };
        true
    }

    pub fn status(&self, slug: &str) -> Option<HealthStatus> {
        self.slots.lock().get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

//! Bounded, expiring cache of search results keyed by the raw query string.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

struct Entry {
    ids: Vec<String>,
    inserted: Instant,
}

/// LRU cache of query results with a fixed time-to-live.
///
/// Entries are never updated in place; an expired entry is dropped on lookup.
pub struct QueryCache {
    entries: Mutex<LruCache<String, Entry>>,
    ttl: Duration,
}

impl QueryCache {
    /// Create a cache holding up to `capacity` queries (at least one).
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Fresh ids cached for `query`, if any.
    pub fn get(&self, query: &str) -> Option<Vec<String>> {
        let mut entries = self.lock();
        let expired = match entries.get(query) {
            Some(entry) if entry.inserted.elapsed() < self.ttl => return Some(entry.ids.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(query);
        }
        None
    }

    pub fn insert(&self, query: impl Into<String>, ids: Vec<String>) {
        self.lock().put(
            query.into(),
            Entry {
                ids,
                inserted: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Entry>> {
        // Entries stay consistent even if a holder panicked.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

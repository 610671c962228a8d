//! Memoisation of series listings.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use haverview_types::SeriesInfo;

/// Cache key: database plus optional page cursor.
pub type CacheKey = (String, Option<String>);

/// Series listings fetched so far, keyed by `(database, cursor)`.
///
/// Entries live until [`SeriesCache::clear`]. The lock is never held across
/// a request.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: Mutex<HashMap<CacheKey, Vec<SeriesInfo>>>,
}

impl SeriesCache {
    /// Returns a copy of a cached listing.
    #[must_use]
    pub fn get(&self, database: &str, cursor: Option<&str>) -> Option<Vec<SeriesInfo>> {
        let key = (database.to_string(), cursor.map(str::to_string));
        self.lock().get(&key).cloned()
    }

    /// Stores a listing, replacing any previous one.
    pub fn insert(&self, database: &str, cursor: Option<&str>, records: Vec<SeriesInfo>) {
        let key = (database.to_string(), cursor.map(str::to_string));
        self.lock().insert(key, records);
    }

    /// Drops every cached listing.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the number of cached listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Vec<SeriesInfo>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

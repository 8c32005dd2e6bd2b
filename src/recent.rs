//! Recent search terms
//!
//! Newest first, capped, no duplicates. Searching again for a term that is
//! already in the list leaves the list as it is.

use crate::store::KeyValueStore;

/// Storage key for the recent searches list
pub const RECENT_SEARCHES_KEY: &str = "RecentSearches";

/// Default number of terms kept
pub const DEFAULT_LIMIT: usize = 5;

/// Recent search history backed by a [`KeyValueStore`]
#[derive(Debug)]
pub struct RecentSearches<K> {
    store: K,
    terms: Vec<String>,
    limit: usize,
}

impl<K: KeyValueStore> RecentSearches<K> {
    /// Load the stored history (missing or unreadable data means empty)
    pub fn open(store: K, limit: usize) -> Self {
        let terms = match store.get(RECENT_SEARCHES_KEY) {
            Ok(Some(blob)) => serde_json::from_slice::<Vec<String>>(&blob).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable recent searches: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read recent searches: {e:#}");
                Vec::new()
            }
        };

        let limit = limit.max(1);
        let mut recent = Self {
            store,
            terms,
            limit,
        };
        recent.terms.truncate(limit);
        recent
    }

    /// Record a search term. Returns `false` if it was empty or already listed.
    pub fn add(&mut self, term: &str) -> bool {
        if term.is_empty() || self.terms.iter().any(|t| t == term) {
            return false;
        }

        self.terms.insert(0, term.to_string());
        self.terms.truncate(self.limit);
        self.persist();
        true
    }

    /// Forget all terms
    pub fn clear(&mut self) {
        self.terms.clear();
        if let Err(e) = self.store.remove(RECENT_SEARCHES_KEY) {
            tracing::warn!("Failed to clear recent searches: {e:#}");
        }
    }

    /// Terms, newest first
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn persist(&self) {
        match serde_json::to_vec(&self.terms) {
            Ok(encoded) => {
                if let Err(e) = self.store.set(RECENT_SEARCHES_KEY, &encoded) {
                    tracing::warn!("Failed to save recent searches: {e:#}");
                }
            }
            Err(e) => tracing::warn!("Failed to encode recent searches: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn stored(store: &MemoryStore) -> Option<Vec<String>> {
        store
            .get(RECENT_SEARCHES_KEY)
            .unwrap()
            .map(|blob| serde_json::from_slice(&blob).unwrap())
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let backing = Arc::new(MemoryStore::new());
        let mut recent = RecentSearches::open(Arc::clone(&backing), DEFAULT_LIMIT);

        for term in ["one", "two", "three", "four", "five", "six"] {
            assert!(recent.add(term));
        }

        let expected = vec!["six", "five", "four", "three", "two"];
        assert_eq!(recent.terms(), expected);
        assert_eq!(stored(&backing).unwrap(), expected);
    }

    #[test]
    fn test_existing_term_is_not_promoted() {
        let backing = Arc::new(MemoryStore::new());
        let mut recent = RecentSearches::open(Arc::clone(&backing), DEFAULT_LIMIT);
        recent.add("cats");
        recent.add("dogs");

        assert!(!recent.add("cats"));

        assert_eq!(recent.terms(), ["dogs", "cats"]);
        assert_eq!(stored(&backing).unwrap(), ["dogs", "cats"]);
    }

    #[test]
    fn test_empty_term_is_ignored() {
        let mut recent = RecentSearches::open(MemoryStore::new(), DEFAULT_LIMIT);
        assert!(!recent.add(""));
        assert!(recent.terms().is_empty());
    }

    #[test]
    fn test_reopen_and_clear() {
        let backing = Arc::new(MemoryStore::new());
        {
            let mut recent = RecentSearches::open(Arc::clone(&backing), DEFAULT_LIMIT);
            recent.add("mountains");
        }

        let mut recent = RecentSearches::open(Arc::clone(&backing), DEFAULT_LIMIT);
        assert_eq!(recent.terms(), ["mountains"]);

        recent.clear();
        assert!(recent.terms().is_empty());
        assert!(stored(&backing).is_none());
    }

    #[test]
    fn test_unreadable_history_starts_empty() {
        let backing = MemoryStore::new();
        backing.set(RECENT_SEARCHES_KEY, b"[1, 2").unwrap();

        let recent = RecentSearches::open(backing, DEFAULT_LIMIT);
        assert!(recent.terms().is_empty());
    }

    #[test]
    fn test_smaller_limit_truncates_stored_history() {
        let backing = Arc::new(MemoryStore::new());
        {
            let mut recent = RecentSearches::open(Arc::clone(&backing), DEFAULT_LIMIT);
            for term in ["a", "b", "c"] {
                recent.add(term);
            }
        }

        let recent = RecentSearches::open(Arc::clone(&backing), 2);
        assert_eq!(recent.terms(), ["c", "b"]);
    }
}

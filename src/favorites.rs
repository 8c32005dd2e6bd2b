//! Favorite photos, persisted write-through to a [`KeyValueStore`]
//!
//! The whole collection is re-encoded and written on every change. Storage
//! problems never surface to the caller: a failed write is logged and the
//! in-memory collection stays authoritative, and an unreadable blob on load
//! leaves the in-memory collection as it was.

use tokio::sync::watch;

use crate::models::ImageRecord;
use crate::store::KeyValueStore;

/// Storage key for the favorites blob
pub const FAVORITES_KEY: &str = "favoriteImages";

/// Ordered, ID-unique collection of favorite photos
pub struct FavoritesStore<K> {
    store: K,
    favorites: watch::Sender<Vec<ImageRecord>>,
}

impl<K> std::fmt::Debug for FavoritesStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("count", &self.favorites.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<K: KeyValueStore> FavoritesStore<K> {
    /// Create an empty store backed by `store` (call [`load`](Self::load) to read it)
    pub fn new(store: K) -> Self {
        let (favorites, _) = watch::channel(Vec::new());
        Self { store, favorites }
    }

    /// Create a store and load whatever is persisted
    pub fn open(store: K) -> Self {
        let favorites = Self::new(store);
        favorites.load();
        favorites
    }

    /// Reload from storage.
    ///
    /// Missing or undecodable data leaves the current collection untouched.
    /// A successful load replaces the collection and writes it back.
    pub fn load(&self) {
        let blob = match self.store.get(FAVORITES_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!("No stored favorites");
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to read favorites: {e:#}");
                return;
            }
        };

        let loaded: Vec<ImageRecord> = match serde_json::from_slice(&blob) {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!("Ignoring unreadable favorites blob: {e}");
                return;
            }
        };

        tracing::debug!(count = loaded.len(), "Loaded favorites");
        self.favorites.send_replace(loaded);
        self.persist();
    }

    /// Add a photo. Returns `false` if a photo with the same ID is already there.
    pub fn add(&self, image: ImageRecord) -> bool {
        let added = self.favorites.send_if_modified(|favorites| {
            if favorites.iter().any(|f| f.id == image.id) {
                return false;
            }
            favorites.push(image);
            true
        });
        if added {
            self.persist();
        }
        added
    }

    /// Remove a photo (matched by ID). Returns `false` if it was not a favorite.
    pub fn remove(&self, image: &ImageRecord) -> bool {
        self.remove_by_id(&image.id)
    }

    /// Remove every entry with `id`. Returns `false` if there was none.
    pub fn remove_by_id(&self, id: &str) -> bool {
        let removed = self.favorites.send_if_modified(|favorites| {
            let before = favorites.len();
            favorites.retain(|f| f.id != id);
            favorites.len() != before
        });
        if removed {
            self.persist();
        }
        removed
    }

    /// Whether a photo with `id` is a favorite
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.borrow().iter().any(|f| f.id == id)
    }

    /// Look up a favorite by ID
    pub fn get(&self, id: &str) -> Option<ImageRecord> {
        self.favorites.borrow().iter().find(|f| f.id == id).cloned()
    }

    /// Current favorites, in the order they were added
    pub fn favorites(&self) -> Vec<ImageRecord> {
        self.favorites.borrow().clone()
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.favorites.borrow().len()
    }

    /// Whether there are no favorites
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Watch for changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<ImageRecord>> {
        self.favorites.subscribe()
    }

    fn persist(&self) {
        let encoded = match serde_json::to_vec(&*self.favorites.borrow()) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("Failed to encode favorites: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(FAVORITES_KEY, &encoded) {
            tracing::warn!("Failed to save favorites: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Exif, Location, fixture};
    use crate::store::MemoryStore;
    use anyhow::{Result, bail};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn ids(store: &FavoritesStore<impl KeyValueStore>) -> Vec<String> {
        store.favorites().into_iter().map(|f| f.id).collect()
    }

    fn stored(store: &MemoryStore) -> Vec<ImageRecord> {
        serde_json::from_slice(&store.get(FAVORITES_KEY).unwrap().unwrap()).unwrap()
    }

    fn fully_populated(id: &str) -> ImageRecord {
        let mut image = fixture(id);
        image.description = Some("Harbor at dusk".to_string());
        image.alt_description = Some("boats in a harbor".to_string());
        image.likes = 42;
        image.user.bio = Some("Sea lover".to_string());
        image.user.portfolio_url = Some("https://example.com/me".to_string());
        image.exif = Some(Exif {
            make: Some("FUJIFILM".to_string()),
            model: Some("X-T4".to_string()),
            exposure_time: Some("1/250".to_string()),
            aperture: Some("5.6".to_string()),
            focal_length: Some("23.0".to_string()),
            iso: Some(160),
        });
        image.location = Some(Location {
            name: Some("Porto, Portugal".to_string()),
            city: Some("Porto".to_string()),
            country: Some("Portugal".to_string()),
        });
        image
    }

    #[test]
    fn test_add_is_idempotent() {
        let backing = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::new(Arc::clone(&backing));

        assert!(favorites.add(fixture("a")));
        assert!(!favorites.add(fixture("a")));

        assert_eq!(ids(&favorites), vec!["a"]);
        assert_eq!(stored(&backing).len(), 1);
    }

    #[test]
    fn test_remove() {
        let backing = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::new(Arc::clone(&backing));
        favorites.add(fixture("a"));
        favorites.add(fixture("b"));

        assert!(favorites.remove(&fixture("a")));
        assert!(!favorites.contains("a"));
        assert_eq!(ids(&favorites), vec!["b"]);
        assert_eq!(stored(&backing), vec![fixture("b")]);

        assert!(!favorites.remove(&fixture("a")));
        assert!(!favorites.remove_by_id("missing"));
        assert_eq!(ids(&favorites), vec!["b"]);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let favorites = FavoritesStore::new(MemoryStore::new());
        for id in ["c", "a", "b"] {
            favorites.add(fixture(id));
        }
        assert_eq!(ids(&favorites), vec!["c", "a", "b"]);
        assert_eq!(favorites.get("a"), Some(fixture("a")));
        assert_eq!(favorites.len(), 3);
    }

    #[test]
    fn test_load_restores_persisted_collection() {
        let backing = Arc::new(MemoryStore::new());
        {
            let favorites = FavoritesStore::new(Arc::clone(&backing));
            favorites.add(fully_populated("full"));
            favorites.add(fixture("bare"));
        }

        let reopened = FavoritesStore::open(Arc::clone(&backing));
        assert_eq!(
            reopened.favorites(),
            vec![fully_populated("full"), fixture("bare")]
        );
    }

    #[test]
    fn test_round_trip_through_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.sqlite");
        let expected = vec![fully_populated("full"), fixture("bare")];

        {
            let favorites = FavoritesStore::new(Database::open_path(&path).unwrap());
            for image in &expected {
                favorites.add(image.clone());
            }
        }

        let favorites = FavoritesStore::open(Database::open_path(&path).unwrap());
        assert_eq!(favorites.favorites(), expected);
    }

    #[test]
    fn test_missing_blob_keeps_state() {
        let backing = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::new(Arc::clone(&backing));
        favorites.add(fixture("a"));
        backing.remove(FAVORITES_KEY).unwrap();

        favorites.load();

        assert_eq!(ids(&favorites), vec!["a"]);
    }

    #[test]
    fn test_corrupt_blob_keeps_state() {
        let backing = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::new(Arc::clone(&backing));
        favorites.add(fixture("a"));
        backing.set(FAVORITES_KEY, b"{not json").unwrap();

        favorites.load();

        assert_eq!(ids(&favorites), vec!["a"]);
        // Nothing was written over the corrupt blob
        assert_eq!(
            backing.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(&b"{not json"[..])
        );
    }

    #[test]
    fn test_corrupt_blob_on_first_load_is_empty() {
        let backing = MemoryStore::new();
        backing.set(FAVORITES_KEY, b"garbage").unwrap();

        let favorites = FavoritesStore::open(backing);

        assert!(favorites.is_empty());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            bail!("disk on fire")
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            bail!("disk on fire")
        }

        fn remove(&self, _key: &str) -> Result<()> {
            bail!("disk on fire")
        }
    }

    #[test]
    fn test_storage_errors_are_contained() {
        let favorites = FavoritesStore::open(FailingStore);

        assert!(favorites.add(fixture("a")));
        assert!(favorites.contains("a"));
        assert!(favorites.remove_by_id("a"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let favorites = FavoritesStore::new(MemoryStore::new());
        let mut updates = favorites.subscribe();

        favorites.add(fixture("a"));
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().len(), 1);

        favorites.add(fixture("a"));
        assert!(!updates.has_changed().unwrap());
    }
}

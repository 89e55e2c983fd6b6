use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    model::Track,
    store::{KeyValueStore, StoreError},
};

pub const FAVORITES_KEY: &str = "favoriteSongs";

/// User-curated tracks keyed by `track_id`, kept in insertion order and
/// written back to the store in full after every change.
pub struct Favorites {
    tracks: Vec<Track>,
    store: Arc<dyn KeyValueStore>,
}

impl Favorites {
    /// Loads the saved list. A missing key is an empty list; an unreadable
    /// or malformed value is logged and treated the same way.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let tracks = match Self::read(store.as_ref()) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("Could not load favorites, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Loaded {} favorite tracks", tracks.len());

        Self { tracks, store }
    }

    fn read(store: &dyn KeyValueStore) -> Result<Vec<Track>, StoreError> {
        let Some(saved) = store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        let mut tracks: Vec<Track> = serde_json::from_str(&saved)?;

        let mut seen = std::collections::HashSet::new();
        tracks.retain(|t| seen.insert(t.track_id));
        Ok(tracks)
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.tracks)
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(FAVORITES_KEY, &json));

        if let Err(e) = result {
            warn!("Failed to persist favorites: {}", e);
        }
    }

    pub fn contains(&self, track: &Track) -> bool {
        self.contains_id(track.track_id)
    }

    pub fn contains_id(&self, track_id: u64) -> bool {
        self.tracks.iter().any(|t| t.track_id == track_id)
    }

    /// Removes the track if present, appends it otherwise. Returns whether
    /// the track is a favorite afterwards.
    pub fn toggle(&mut self, track: &Track) -> bool {
        let now_favorite = if self.contains(track) {
            self.tracks.retain(|t| !t.same_track(track));
            false
        } else {
            self.tracks.push(track.clone());
            true
        };
        self.persist();
        now_favorite
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn track(id: u64) -> Track {
        Track {
            track_id: id,
            track_name: Some(format!("Track {id}")),
            artist_name: Some("Artist".into()),
            artwork_url100: None,
            preview_url: None,
            primary_genre_name: None,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let store = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store);

        assert!(favorites.toggle(&track(1)));
        assert!(favorites.contains(&track(1)));
        assert!(!favorites.toggle(&track(1)));
        assert!(favorites.is_empty());
    }

    #[test]
    fn membership_is_by_track_id_only() {
        let store = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store);
        favorites.toggle(&track(5));

        let mut renamed = track(5);
        renamed.track_name = Some("Different name".into());
        assert!(favorites.contains(&renamed));
        favorites.toggle(&renamed);
        assert!(favorites.is_empty());
    }

    #[test]
    fn every_toggle_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store.clone());
        favorites.toggle(&track(3));
        favorites.toggle(&track(1));

        let saved = store.get(FAVORITES_KEY).unwrap().unwrap();
        let ids: Vec<u64> = serde_json::from_str::<Vec<Track>>(&saved)
            .unwrap()
            .iter()
            .map(|t| t.track_id)
            .collect();
        assert_eq!(ids, vec![3, 1]);

        favorites.toggle(&track(3));
        let saved = store.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Vec<Track>>(&saved).unwrap().len(), 1);
    }

    #[test]
    fn reload_preserves_order() {
        let store = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store.clone());
        for id in [9, 2, 7] {
            favorites.toggle(&track(id));
        }

        let reloaded = Favorites::load(store);
        let ids: Vec<u64> = reloaded.tracks().iter().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![9, 2, 7]);
    }

    #[test]
    fn malformed_saved_value_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(FAVORITES_KEY, "{not json").unwrap();
        assert!(Favorites::load(store).is_empty());
    }

    #[test]
    fn duplicate_ids_in_saved_value_are_collapsed() {
        let store = Arc::new(MemoryStore::new());
        let saved = serde_json::to_string(&vec![track(1), track(2), track(1)]).unwrap();
        store.set(FAVORITES_KEY, &saved).unwrap();

        let favorites = Favorites::load(store);
        assert_eq!(favorites.len(), 2);
    }
}

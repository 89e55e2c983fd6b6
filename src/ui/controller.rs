use rand::{Rng, seq::SliceRandom};
use tracing::{debug, error, info};

use crate::{
    event::events::{Event, RequestId},
    http::{ApiError, SearchApi},
    model::{Track, mood::search_term},
    store::Favorites,
    ui::state::{AppState, ViewMode},
};

pub const FETCH_ERROR_MESSAGE: &str =
    "Something went wrong while fetching songs. Please try again.";

/// A fetch the controller has issued and is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub mood: String,
    pub term: String,
}

impl FetchRequest {
    pub async fn run(self, api: &dyn SearchApi) -> Event {
        match api.search(&self.term).await {
            Ok(tracks) => Event::SongsFetched(self.id, tracks),
            Err(e) => Event::FetchError(self.id, e),
        }
    }
}

/// Owns all application state and exposes the operations the UI triggers.
/// Network work happens outside: the controller hands out a [`FetchRequest`]
/// and later receives its outcome through [`Controller::apply_fetch`].
pub struct Controller {
    state: AppState,
    favorites: Favorites,
    latest_request: RequestId,
}

impl Controller {
    pub fn new(favorites: Favorites) -> Self {
        Self {
            state: AppState::default(),
            favorites,
            latest_request: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn select_mood(&mut self, mood: &str) -> FetchRequest {
        self.state.ui.selected_mood = Some(mood.to_string());
        self.state.ui.view_mode = ViewMode::Playlist;
        self.fetch_songs(mood)
    }

    pub fn fetch_songs(&mut self, mood: &str) -> FetchRequest {
        self.latest_request += 1;
        self.state.ui.is_loading = true;
        self.state.ui.error_message = None;

        let request = FetchRequest {
            id: self.latest_request,
            mood: mood.to_string(),
            term: search_term(mood).to_string(),
        };
        info!("Fetching songs for '{}' (request {})", mood, request.id);
        request
    }

    /// Applies the outcome of a fetch. Outcomes of superseded requests are
    /// dropped; returns whether the state changed.
    pub fn apply_fetch(&mut self, id: RequestId, result: Result<Vec<Track>, ApiError>) -> bool {
        if id != self.latest_request {
            debug!(
                "Dropping stale fetch result {} (latest is {})",
                id, self.latest_request
            );
            return false;
        }

        self.state.ui.is_loading = false;
        match result {
            Ok(tracks) => {
                info!("Fetched {} tracks", tracks.len());
                self.state.data.playlist = tracks;
            }
            Err(e) => {
                error!("Error fetching songs: {}", e);
                self.state.ui.error_message = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        self.favorites.toggle(track)
    }

    pub fn is_favorite(&self, track: &Track) -> bool {
        self.favorites.contains(track)
    }

    pub fn can_shuffle(&self) -> bool {
        self.state.ui.view_mode == ViewMode::Playlist && self.state.ui.selected_mood.is_some()
    }

    pub fn shuffle(&mut self) -> bool {
        self.shuffle_with(&mut rand::rng())
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.state.ui.view_mode != ViewMode::Playlist {
            return false;
        }
        self.state.data.playlist.shuffle(rng);
        true
    }

    pub fn toggle_favorites_view(&mut self) {
        self.state.ui.view_mode = self.state.ui.view_mode.toggled();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.ui.view_mode
    }

    pub fn playlist(&self) -> &[Track] {
        &self.state.data.playlist
    }

    pub fn displayed_tracks(&self) -> &[Track] {
        match self.state.ui.view_mode {
            ViewMode::Favorites => self.favorites.tracks(),
            ViewMode::Playlist => &self.state.data.playlist,
        }
    }

    pub fn heading(&self) -> String {
        match (&self.state.ui.view_mode, &self.state.ui.selected_mood) {
            (ViewMode::Favorites, _) => "⭐ Your Favorite Songs".to_string(),
            (ViewMode::Playlist, Some(mood)) => format!("{mood} Playlist"),
            (ViewMode::Playlist, None) => "Select a Mood".to_string(),
        }
    }

    pub fn view_toggle_label(&self) -> &'static str {
        match self.state.ui.view_mode {
            ViewMode::Favorites => "🎵 Back to Playlist",
            ViewMode::Playlist => "⭐ View Favorites",
        }
    }

    pub fn favorite_label(&self, track: &Track) -> &'static str {
        if self.is_favorite(track) {
            "💖 Remove Favorite"
        } else {
            "🤍 Add to Favorites"
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rand::{SeedableRng, rngs::StdRng};
    use reqwest::StatusCode;

    use super::*;
    use crate::store::MemoryStore;

    fn track(id: u64) -> Track {
        Track {
            track_id: id,
            track_name: Some(format!("Song {id}")),
            artist_name: Some("Someone".into()),
            artwork_url100: None,
            preview_url: None,
            primary_genre_name: None,
        }
    }

    fn controller() -> Controller {
        Controller::new(Favorites::load(Arc::new(MemoryStore::new())))
    }

    fn ids(tracks: &[Track]) -> Vec<u64> {
        tracks.iter().map(|t| t.track_id).collect()
    }

    struct FixedApi(Vec<Track>);

    #[async_trait]
    impl SearchApi for FixedApi {
        async fn search(&self, _term: &str) -> Result<Vec<Track>, ApiError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn select_mood_resolves_phrase_and_starts_loading() {
        let mut c = controller();
        let request = c.select_mood("Happy");

        assert_eq!(request.term, "feel good upbeat pop");
        assert_eq!(request.mood, "Happy");
        assert!(c.state().ui.is_loading);
        assert_eq!(c.heading(), "Happy Playlist");
    }

    #[test]
    fn unknown_mood_uses_raw_string() {
        let mut c = controller();
        assert_eq!(c.select_mood("Rainy").term, "Rainy");
    }

    #[test]
    fn select_mood_forces_playlist_view() {
        let mut c = controller();
        c.toggle_favorites_view();
        assert_eq!(c.view_mode(), ViewMode::Favorites);

        c.select_mood("Chill");
        assert_eq!(c.view_mode(), ViewMode::Playlist);
    }

    #[test]
    fn failed_fetch_keeps_previous_playlist() {
        let mut c = controller();
        let first = c.select_mood("Sad");
        c.apply_fetch(first.id, Ok(vec![track(1), track(2)]));

        let second = c.select_mood("Focus");
        c.apply_fetch(
            second.id,
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
        );

        assert!(!c.state().ui.is_loading);
        assert_eq!(c.state().ui.error_message.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(ids(c.playlist()), vec![1, 2]);
    }

    #[test]
    fn new_fetch_clears_previous_error() {
        let mut c = controller();
        let request = c.select_mood("Sad");
        c.apply_fetch(
            request.id,
            Err(ApiError::Status(StatusCode::SERVICE_UNAVAILABLE)),
        );
        assert!(c.state().ui.error_message.is_some());

        c.select_mood("Sad");
        assert!(c.state().ui.error_message.is_none());
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut c = controller();
        let early = c.select_mood("Happy");
        let late = c.select_mood("Sad");

        assert!(!c.apply_fetch(early.id, Ok(vec![track(1)])));
        assert!(c.state().ui.is_loading);
        assert!(c.playlist().is_empty());

        assert!(c.apply_fetch(late.id, Ok(vec![track(2)])));
        assert_eq!(ids(c.playlist()), vec![2]);
        assert!(!c.apply_fetch(early.id, Ok(vec![track(1)])));
        assert_eq!(ids(c.playlist()), vec![2]);
    }

    #[test]
    fn favorite_toggles_track_membership_by_parity() {
        let mut c = controller();
        let toggles = [1, 2, 1, 3, 1, 2, 2];
        for id in toggles {
            c.toggle_favorite(&track(id));
        }

        for id in [1, 2, 3] {
            let count = toggles.iter().filter(|&&t| t == id).count();
            assert_eq!(c.is_favorite(&track(id)), count % 2 == 1);
        }
        let mut favorite_ids = ids(c.favorites().tracks());
        favorite_ids.sort();
        favorite_ids.dedup();
        assert_eq!(favorite_ids.len(), c.favorites().len());
    }

    #[test]
    fn shuffle_is_a_permutation_and_leaves_favorites() {
        let mut c = controller();
        let request = c.select_mood("Energetic");
        c.apply_fetch(request.id, Ok((1..=12).map(track).collect()));
        c.toggle_favorite(&track(4));
        c.toggle_favorite(&track(9));

        let mut rng = StdRng::seed_from_u64(7);
        assert!(c.shuffle_with(&mut rng));

        let mut shuffled = ids(c.playlist());
        shuffled.sort();
        assert_eq!(shuffled, (1..=12).collect::<Vec<_>>());
        assert_eq!(ids(c.favorites().tracks()), vec![4, 9]);
    }

    #[test]
    fn shuffle_is_refused_in_favorites_view() {
        let mut c = controller();
        let request = c.select_mood("Energetic");
        c.apply_fetch(request.id, Ok((1..=5).map(track).collect()));
        c.toggle_favorites_view();

        assert!(!c.can_shuffle());
        assert!(!c.shuffle());
        assert_eq!(ids(c.playlist()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn double_view_toggle_restores_displayed_list() {
        let mut c = controller();
        let request = c.select_mood("Chill");
        c.apply_fetch(request.id, Ok(vec![track(1), track(2)]));
        c.toggle_favorite(&track(8));

        let before = ids(c.displayed_tracks());
        c.toggle_favorites_view();
        assert_eq!(ids(c.displayed_tracks()), vec![8]);
        assert_eq!(c.heading(), "⭐ Your Favorite Songs");
        c.toggle_favorites_view();
        assert_eq!(ids(c.displayed_tracks()), before);
    }

    #[test]
    fn labels_follow_state() {
        let mut c = controller();
        assert_eq!(c.heading(), "Select a Mood");
        assert_eq!(c.view_toggle_label(), "⭐ View Favorites");
        assert_eq!(c.favorite_label(&track(1)), "🤍 Add to Favorites");

        c.toggle_favorite(&track(1));
        c.toggle_favorites_view();
        assert_eq!(c.view_toggle_label(), "🎵 Back to Playlist");
        assert_eq!(c.favorite_label(&track(1)), "💖 Remove Favorite");
    }

    #[tokio::test]
    async fn fetch_request_reports_through_event() {
        let mut c = controller();
        let request = c.select_mood("Happy");
        assert!(c.state().ui.is_loading);

        let api = FixedApi(vec![track(1), track(2), track(3)]);
        match request.run(&api).await {
            Event::SongsFetched(id, tracks) => {
                c.apply_fetch(id, Ok(tracks));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert!(!c.state().ui.is_loading);
        assert_eq!(c.displayed_tracks().len(), 3);
        assert_eq!(c.view_mode(), ViewMode::Playlist);
    }
}

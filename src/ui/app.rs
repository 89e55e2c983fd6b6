use std::sync::Arc;

use flume::{Receiver, Sender};
use ratatui::Frame;
use tracing::{info, warn};

use crate::{
    audio::PreviewPlayer,
    config::Config,
    event::events::Event,
    http::{ApiService, SearchApi},
    model::Track,
    store::{Favorites, FileStore},
    ui::{
        components::mood_selector::MoodSelector,
        controller::{Controller, FetchRequest},
        layout::AppLayout,
        message::AppMessage,
        tui::Tui,
        util::handler::EventHandler,
        views::TrackList,
    },
    util::task::TaskManager,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub api: Arc<dyn SearchApi>,
    pub controller: Controller,
    pub preview: Option<PreviewPlayer>,
    pub task_manager: TaskManager,
    pub track_list: TrackList,
    pub mood_focus: usize,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let api = ApiService::new(config)?;
        let client = api.client().clone();
        let favorites = Favorites::load(Arc::new(FileStore::new(&config.data_dir)));

        let mut app = Self::with_parts(Arc::new(api), Controller::new(favorites));
        match PreviewPlayer::new(client, app.event_tx.clone()) {
            Ok(player) => app.preview = Some(player),
            Err(e) => warn!("Preview playback disabled: {}", e),
        }

        Ok(app)
    }

    /// Builds an app without an audio device, around any search backend.
    pub fn with_parts(api: Arc<dyn SearchApi>, controller: Controller) -> Self {
        let (event_tx, event_rx) = flume::unbounded();

        Self {
            event_rx,
            event_tx,
            api,
            controller,
            preview: None,
            task_manager: TaskManager::new(),
            track_list: TrackList::default(),
            mood_focus: 0,
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut should_render = true;
        while !self.should_quit {
            if should_render {
                tui.draw(|f| self.ui(f))?;
            }
            should_render = EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }

    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => {
                info!("Quitting");
                self.should_quit = true;
            }
            AppMessage::SelectMood(index) => self.select_mood(index),
            AppMessage::FocusNextMood => self.mood_focus = MoodSelector::focus_next(self.mood_focus),
            AppMessage::FocusPreviousMood => {
                self.mood_focus = MoodSelector::focus_previous(self.mood_focus)
            }
            AppMessage::ActivateFocusedMood => self.select_mood(self.mood_focus),
            AppMessage::SelectNextTrack => {
                self.track_list
                    .select_next(self.controller.displayed_tracks().len());
                self.stop_preview_off_selection();
            }
            AppMessage::SelectPreviousTrack => {
                self.track_list
                    .select_previous(self.controller.displayed_tracks().len());
                self.stop_preview_off_selection();
            }
            AppMessage::ToggleFavorite => {
                if let Some(track) = self.selected_track() {
                    self.controller.toggle_favorite(&track);
                    self.track_list
                        .clamp(self.controller.displayed_tracks().len());
                }
            }
            AppMessage::ToggleFavoritesView => {
                self.stop_preview();
                self.controller.toggle_favorites_view();
                self.track_list.reset();
            }
            AppMessage::Shuffle => {
                if self.controller.can_shuffle() {
                    self.controller.shuffle();
                    self.stop_preview_off_selection();
                }
            }
            AppMessage::PlayPreview => self.play_selected_preview(),
            AppMessage::StopPreview => self.stop_preview(),
            AppMessage::ToggleMute => {
                if let Some(player) = self.preview.as_mut() {
                    player.toggle_mute();
                }
            }
        }
    }

    fn select_mood(&mut self, index: usize) {
        let Some(request) =
            MoodSelector::activate(index, |mood| self.controller.select_mood(mood))
        else {
            return;
        };

        self.mood_focus = index;
        self.stop_preview();
        self.track_list.reset();
        self.spawn_fetch(request);
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();

        self.task_manager.spawn("fetch_songs", async move {
            let event = request.run(api.as_ref()).await;
            let _ = tx.send(event);
        });
    }

    pub fn selected_track(&self) -> Option<Track> {
        let index = self.track_list.selected()?;
        self.controller.displayed_tracks().get(index).cloned()
    }

    pub fn previewing(&self) -> Option<u64> {
        self.preview.as_ref().and_then(|p| p.current_track_id())
    }

    fn play_selected_preview(&mut self) {
        let Some(track) = self.selected_track() else {
            return;
        };
        let Some(player) = self.preview.as_mut() else {
            return;
        };

        if player.current_track_id() == Some(track.track_id) {
            player.stop();
        } else if let Err(e) = player.play(&track) {
            warn!("Cannot preview '{}': {}", track.title(), e);
        }
    }

    fn stop_preview(&mut self) {
        if let Some(player) = self.preview.as_mut() {
            player.stop();
        }
    }

    /// Leaving the previewing track stops and rewinds its preview.
    fn stop_preview_off_selection(&mut self) {
        let selected = self.selected_track().map(|t| t.track_id);
        if let Some(current) = self.previewing() {
            if selected != Some(current) {
                self.stop_preview();
            }
        }
    }
}

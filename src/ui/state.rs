use crate::model::Track;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Playlist,
    Favorites,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Playlist => ViewMode::Favorites,
            ViewMode::Favorites => ViewMode::Playlist,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub data: AppData,
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub playlist: Vec<Track>,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected_mood: Option<String>,
    pub view_mode: ViewMode,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

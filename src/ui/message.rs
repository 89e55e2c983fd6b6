#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Quit,

    // Mood selector
    SelectMood(usize),
    FocusNextMood,
    FocusPreviousMood,
    ActivateFocusedMood,

    // Track list
    SelectNextTrack,
    SelectPreviousTrack,
    ToggleFavorite,
    ToggleFavoritesView,
    Shuffle,

    // Preview
    PlayPreview,
    StopPreview,
    ToggleMute,
}

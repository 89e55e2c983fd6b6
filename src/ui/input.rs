use crate::ui::message::AppMessage;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) => Some(AppMessage::Quit),
            (KeyCode::Char(c @ '1'..='9'), _) => {
                Some(AppMessage::SelectMood(c as usize - '1' as usize))
            }
            (KeyCode::Left | KeyCode::Char('h'), _) => Some(AppMessage::FocusPreviousMood),
            (KeyCode::Right | KeyCode::Char('l'), _) => Some(AppMessage::FocusNextMood),
            (KeyCode::Char('m'), _) => Some(AppMessage::ActivateFocusedMood),
            (KeyCode::Char('M'), _) => Some(AppMessage::ToggleMute),
            (KeyCode::Down | KeyCode::Char('j'), _) => Some(AppMessage::SelectNextTrack),
            (KeyCode::Up | KeyCode::Char('k'), _) => Some(AppMessage::SelectPreviousTrack),
            (KeyCode::Char(' '), _) => Some(AppMessage::ToggleFavorite),
            (KeyCode::Char('f'), _) => Some(AppMessage::ToggleFavoritesView),
            (KeyCode::Char('s'), _) => Some(AppMessage::Shuffle),
            (KeyCode::Enter, _) => Some(AppMessage::PlayPreview),
            (KeyCode::Esc, _) => Some(AppMessage::StopPreview),
            _ => None,
        }
    }
}

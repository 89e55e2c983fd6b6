use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::{
    model::Track,
    ui::util::{get_active_track_icon, truncate},
    util::colors,
};

/// One entry of the track list: title, artist and genre, preview state and
/// the favorite toggle label.
pub struct TrackCard<'a> {
    track: &'a Track,
    favorite_label: &'static str,
    is_favorite: bool,
    preview: PreviewState,
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Unavailable,
    Idle,
    Playing,
}

impl<'a> TrackCard<'a> {
    pub fn new(track: &'a Track, favorite_label: &'static str, is_favorite: bool) -> Self {
        let preview = if track.preview().is_some() {
            PreviewState::Idle
        } else {
            PreviewState::Unavailable
        };

        Self {
            track,
            favorite_label,
            is_favorite,
            preview,
            width: usize::MAX,
        }
    }

    pub fn playing(mut self, playing: bool) -> Self {
        if playing && self.preview != PreviewState::Unavailable {
            self.preview = PreviewState::Playing;
        }
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn into_list_item(self) -> ListItem<'a> {
        let indicator = match self.preview {
            PreviewState::Playing => get_active_track_icon(true),
            _ => " ",
        };
        let title_width = self.width.saturating_sub(6);

        let title = Line::from(vec![
            Span::raw(format!("{indicator} ")),
            Span::styled(
                format!("🎵 {}", truncate(self.track.title(), title_width)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);

        let mut byline = format!("by {}", self.track.artist());
        if let Some(genre) = self.track.genre() {
            byline.push_str(" · ");
            byline.push_str(genre);
        }
        let byline = Line::from(Span::styled(
            format!("   {}", truncate(&byline, self.width.saturating_sub(3))),
            Style::default().fg(colors::NEUTRAL),
        ));

        let favorite_style = if self.is_favorite {
            Style::default().fg(colors::FAVORITE)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let preview_hint = match self.preview {
            PreviewState::Unavailable => "",
            PreviewState::Idle => "   ⏵ preview",
            PreviewState::Playing => "   ♪ playing preview",
        };
        let actions = Line::from(vec![
            Span::raw("   "),
            Span::styled(self.favorite_label, favorite_style),
            Span::styled(preview_hint, Style::default().fg(colors::SECONDARY)),
        ]);

        ListItem::new(vec![title, byline, actions, Line::default()])
    }
}

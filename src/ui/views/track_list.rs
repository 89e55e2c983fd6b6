use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    ui::{
        components::{spinner::Spinner, track_card::TrackCard},
        controller::Controller,
        state::ViewMode,
    },
    util::colors,
};

#[derive(Default)]
pub struct TrackList {
    list_state: ListState,
}

impl TrackList {
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn reset(&mut self) {
        self.list_state = ListState::default();
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i.min(len - 1)));
    }

    /// Keeps the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (Some(i), len) if i >= len => self.list_state.select(Some(len - 1)),
            (None, _) => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        controller: &Controller,
        previewing: Option<u64>,
    ) {
        let state = controller.state();
        if state.ui.is_loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Fetching songs...");
            f.render_widget(spinner, area);
            return;
        }

        let tracks = controller.displayed_tracks();
        if tracks.is_empty() {
            let hint = match state.ui.view_mode {
                ViewMode::Favorites => "No favorites yet. Press space on a track to add one.",
                ViewMode::Playlist if state.ui.selected_mood.is_some() => "No tracks found",
                ViewMode::Playlist => "Pick a mood with 1-5 to get a playlist",
            };
            f.render_widget(
                Paragraph::new(hint)
                    .style(Style::default().fg(colors::NEUTRAL))
                    .centered(),
                area,
            );
            return;
        }

        self.clamp(tracks.len());

        let width = area.width as usize;
        let items: Vec<ListItem> = tracks
            .iter()
            .map(|track| {
                TrackCard::new(
                    track,
                    controller.favorite_label(track),
                    controller.is_favorite(track),
                )
                .playing(previewing == Some(track.track_id))
                .width(width)
                .into_list_item()
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

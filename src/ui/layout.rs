use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    ui::{app::App, components::mood_selector::MoodSelector, state::ViewMode},
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let selector_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title("🎧 Mood-Based Music Finder")
            .title_alignment(Alignment::Center);
        let selector_inner = selector_block.inner(chunks[0]);
        f.render_widget(selector_block, chunks[0]);

        let state = self.app.controller.state();
        f.render_widget(
            MoodSelector::new(self.app.mood_focus, state.ui.selected_mood.as_deref()),
            selector_inner,
        );

        f.render_widget(self.status_line(), chunks[1]);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(self.heading_line())
            .title_alignment(Alignment::Left);
        let content_inner = content_block.inner(chunks[2]);
        f.render_widget(content_block, chunks[2]);

        let previewing = self.app.previewing();
        self.app
            .track_list
            .render(f, content_inner, &self.app.controller, previewing);

        f.render_widget(self.help_line(), chunks[3]);
    }

    fn heading_line(&self) -> Line<'static> {
        let controller = &self.app.controller;
        let mut spans = vec![Span::styled(
            format!(" {} ", controller.heading()),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )];
        if controller.view_mode() == ViewMode::Favorites {
            spans.push(Span::styled(
                format!("({}) ", controller.favorites().len()),
                Style::default().fg(colors::NEUTRAL),
            ));
        }
        Line::from(spans)
    }

    fn status_line(&self) -> Paragraph<'static> {
        let controller = &self.app.controller;
        let mut spans = Vec::new();
        if let Some(error) = &controller.state().ui.error_message {
            spans.push(Span::styled(error.clone(), Style::default().fg(colors::ERROR)));
            spans.push(Span::raw("   "));
        }

        spans.push(Span::styled(
            format!("[f] {}", controller.view_toggle_label()),
            Style::default().fg(colors::SECONDARY),
        ));
        if controller.can_shuffle() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                "[s] 🔀 Shuffle",
                Style::default().fg(colors::SECONDARY),
            ));
        }
        if let Some(player) = &self.app.preview {
            if player.is_muted {
                spans.push(Span::raw("   "));
                spans.push(Span::styled("🔇 muted", Style::default().fg(colors::NEUTRAL)));
            }
        }
        Paragraph::new(Line::from(spans))
    }

    fn help_line(&self) -> Paragraph<'static> {
        let help = if self.app.preview.is_some() {
            "1-5 mood · ←/→ m focus mood · ↑/↓ move · space favorite · f favorites · s shuffle · enter preview · esc stop · M mute · q quit"
        } else {
            "1-5 mood · ←/→ m focus mood · ↑/↓ move · space favorite · f favorites · s shuffle · q quit"
        };
        Paragraph::new(help)
            .style(Style::default().fg(colors::NEUTRAL))
            .centered()
    }
}

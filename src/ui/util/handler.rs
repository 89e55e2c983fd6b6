use tracing::{debug, info, warn};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        state::ViewMode,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    /// Waits for the next terminal event, then drains pending app events.
    /// Returns whether the screen needs redrawing.
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui)? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_app_event(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => info!("Terminal ready"),
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => {
                if let Some(msg) = InputHandler::handle_key(key) {
                    app.update(msg);
                }
            }
            TerminalEvent::Tick => return Ok(app.has_focus),
            TerminalEvent::Resize(_, _) => {}
        }

        Ok(true)
    }

    pub fn handle_app_event(app: &mut App, evt: Event) {
        match evt {
            Event::SongsFetched(id, tracks) => {
                if app.controller.apply_fetch(id, Ok(tracks))
                    && app.controller.view_mode() == ViewMode::Playlist
                {
                    app.track_list.reset();
                }
            }
            Event::FetchError(id, e) => {
                app.controller.apply_fetch(id, Err(e));
            }
            Event::PreviewStarted(track_id) => debug!("Preview of {} started", track_id),
            Event::PreviewEnded(track_id) => debug!("Preview of {} ended", track_id),
            Event::PreviewFailed(track_id, e) => {
                warn!("Preview of {} failed: {}", track_id, e);
                if let Some(player) = app.preview.as_mut() {
                    if player.current_track_id() == Some(track_id) {
                        player.stop();
                    }
                }
            }
        }
    }
}

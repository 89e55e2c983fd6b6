use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{model::Mood, util::colors};

pub struct MoodOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const MOOD_OPTIONS: [MoodOption; 5] = [
    MoodOption { value: Mood::Happy.value(), label: Mood::Happy.label() },
    MoodOption { value: Mood::Sad.value(), label: Mood::Sad.label() },
    MoodOption { value: Mood::Energetic.value(), label: Mood::Energetic.label() },
    MoodOption { value: Mood::Chill.value(), label: Mood::Chill.label() },
    MoodOption { value: Mood::Focus.value(), label: Mood::Focus.label() },
];

/// Row of mood buttons. Holds no state of its own: the caller passes the
/// focused index and the active mood, and activation goes through
/// [`MoodSelector::activate`].
pub struct MoodSelector<'a> {
    focused: usize,
    active: Option<&'a str>,
}

impl<'a> MoodSelector<'a> {
    pub fn new(focused: usize, active: Option<&'a str>) -> Self {
        Self { focused, active }
    }

    /// Reports the mood at `index` to `on_select`. Out-of-range indices are
    /// ignored.
    pub fn activate<F, R>(index: usize, on_select: F) -> Option<R>
    where
        F: FnOnce(&'static str) -> R,
    {
        MOOD_OPTIONS.get(index).map(|option| on_select(option.value))
    }

    pub fn focus_next(focused: usize) -> usize {
        (focused + 1) % MOOD_OPTIONS.len()
    }

    pub fn focus_previous(focused: usize) -> usize {
        (focused + MOOD_OPTIONS.len() - 1) % MOOD_OPTIONS.len()
    }
}

impl Widget for MoodSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(MOOD_OPTIONS.len() * 2);
        for (i, option) in MOOD_OPTIONS.iter().enumerate() {
            let mut style = Style::default().fg(colors::NEUTRAL);
            if self.active == Some(option.value) {
                style = style.fg(colors::PRIMARY).add_modifier(Modifier::BOLD);
            }
            if i == self.focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {} {} ", i + 1, option.label), style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans)).centered().render(area, buf);
    }
}

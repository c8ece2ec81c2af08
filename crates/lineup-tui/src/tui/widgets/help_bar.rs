// Help bar: key hints, or the latest status message / drag in progress.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lineup_core::controller::Mode;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Text for the help bar. A drag in progress wins over messages, which win
/// over the key hints.
pub fn help_text(state: &ViewState) -> String {
    if let Some(player) = &state.feedback.dragging {
        let target = state
            .feedback
            .highlighted
            .map(|group| group.label().to_string())
            .unwrap_or_else(|| "--".to_string());
        return format!(" Dragging {} -> {}", state.name_of(player), target);
    }
    if let Some(message) = &state.message {
        return format!(" {message}");
    }
    let mode_keys = match state.mode {
        Mode::Drag => "mouse: drag players",
        Mode::Dropdown => "j/k:Row h/a/b:Assign",
        Mode::Auto => "g:Auto-assign",
    };
    format!(" q:Quit | 1-3:Mode | {mode_keys} | s:Save")
}

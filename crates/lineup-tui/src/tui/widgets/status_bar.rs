// Status bar widget: group counters, save readiness, and the mode tabs row.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lineup_core::controller::Mode;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [save indicator] [home/away/bench counters]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (label, color) = save_indicator(state.can_save);
    let spans = vec![
        Span::styled(format!(" {} ", label), Style::default().fg(color)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!(
                "Home {}  Away {}  Bench {}",
                state.counts.home, state.counts.away, state.counts.bench
            ),
            Style::default().fg(Color::White),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Render the mode tab row.
pub fn render_mode_tabs(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(mode_spans(state.mode)));
    frame.render_widget(paragraph, area);
}

/// Label and color for the save button state.
pub fn save_indicator(can_save: bool) -> (&'static str, Color) {
    if can_save {
        ("● Ready to save", Color::Green)
    } else {
        ("● Both teams need players", Color::Red)
    }
}

/// Build mode tab spans with the active mode highlighted.
/// E.g. "[1:Drag] [2:Dropdown] [3:Auto]"
pub fn mode_spans(active: Mode) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (index, mode) in Mode::ALL.into_iter().enumerate() {
        let style = if mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", index + 1, mode_label(mode)),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Drag => "Drag",
        Mode::Dropdown => "Dropdown",
        Mode::Auto => "Auto",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

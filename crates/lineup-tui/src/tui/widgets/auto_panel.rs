// Auto-assign panel: trigger hint, busy indicator, and the last split.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use lineup_core::assignment::{Group, PlayerId};

use super::board::group_color;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = vec![Line::from(status_span(state.auto_busy))];

    if let Some(result) = &state.last_auto {
        lines.push(Line::from(""));
        lines.push(team_line(Group::Home, &result.home, state));
        lines.push(team_line(Group::Away, &result.away, state));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Auto-assign"));
    frame.render_widget(paragraph, area);
}

pub fn status_span(busy: bool) -> Span<'static> {
    if busy {
        Span::styled(
            "Assigning...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("Press g to split every player into two random teams")
    }
}

fn team_line(group: Group, ids: &[PlayerId], state: &ViewState) -> Line<'static> {
    let names: Vec<&str> = ids.iter().map(|id| state.name_of(id)).collect();
    Line::from(vec![
        Span::styled(
            format!("{} ({}): ", group.label(), ids.len()),
            Style::default()
                .fg(group_color(group))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(names.join(", ")),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

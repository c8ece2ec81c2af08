// Dropdown widgets: one selector row per player, plus per-group counters and
// avatar previews.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use lineup_core::assignment::Group;
use lineup_core::dropdown::PreviewEntry;

use super::board::group_color;
use crate::tui::ViewState;

/// Render the selector table.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![Cell::from("Player"), Cell::from("Group")]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if state.selectors.is_empty() {
        vec![Row::new(vec![Cell::from("  No players loaded")])]
    } else {
        state
            .selectors
            .iter()
            .enumerate()
            .map(|(index, selector)| {
                let row = Row::new(vec![
                    Cell::from(state.name_of(&selector.player).to_string()),
                    Cell::from(Line::from(choice_spans(selector.value))),
                ]);
                if index == state.selected_row {
                    row.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    row
                }
            })
            .collect()
    };

    let widths = [Constraint::Min(16), Constraint::Length(22)];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Selectors (j/k move, h/a/b assign)"),
    );
    frame.render_widget(table, area);
}

/// The three choices with the current one marked, e.g. "(H) a  b".
pub fn choice_spans(value: Group) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for group in Group::ALL {
        let short = match group {
            Group::Home => "H",
            Group::Away => "A",
            Group::Bench => "B",
        };
        if group == value {
            spans.push(Span::styled(
                format!("({short})"),
                Style::default()
                    .fg(group_color(group))
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", short.to_lowercase()),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        spans.push(Span::raw(" "));
    }
    spans
}

/// Render counters and preview strips for each group.
pub fn render_summary(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = Vec::new();
    for group in Group::ALL {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", group.label(), state.summary.counts.get(group)),
            Style::default()
                .fg(group_color(group))
                .add_modifier(Modifier::BOLD),
        )));
        let previews = state.summary.previews(group);
        if previews.is_empty() {
            lines.push(Line::from(Span::styled(
                "  --",
                Style::default().add_modifier(Modifier::DIM),
            )));
        } else {
            lines.extend(previews.iter().map(preview_line));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(paragraph, area);
}

fn preview_line(entry: &PreviewEntry) -> Line<'static> {
    let avatar = if entry.avatar.is_empty() {
        String::new()
    } else {
        format!(" [{}]", entry.avatar)
    };
    Line::from(vec![
        Span::raw(format!("  {}", entry.name)),
        Span::styled(avatar, Style::default().fg(Color::DarkGray)),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

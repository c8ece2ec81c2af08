// Drag board widget: home, away and bench columns.
//
// The column under the pointer gets a highlighted border while a drag is in
// progress, and the dragged player is drawn dimmed in its source column.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use lineup_core::assignment::Group;
use lineup_core::drag::BoardEntry;

use crate::tui::layout::AppLayout;
use crate::tui::ViewState;

/// Render all three columns.
pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    for group in Group::ALL {
        let entries = state.board.container(group);
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| ListItem::new(entry_line(entry, group, state)))
            .collect();

        let border_style = if state.feedback.highlighted == Some(group) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(group_color(group))
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(column_title(group, state.board.counts.get(group))),
        );
        frame.render_widget(list, layout.column(group));
    }
}

/// Column title with its counter, e.g. "Home (3)".
pub fn column_title(group: Group, count: usize) -> String {
    format!("{} ({})", group.label(), count)
}

pub fn group_color(group: Group) -> Color {
    match group {
        Group::Home => Color::Blue,
        Group::Away => Color::Red,
        Group::Bench => Color::Gray,
    }
}

fn entry_line(entry: &BoardEntry, group: Group, state: &ViewState) -> Line<'static> {
    let dragging = state.feedback.dragging.as_ref() == Some(&entry.id);
    let style = if dragging {
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)
    } else if group.is_field() {
        Style::default().fg(group_color(group))
    } else {
        Style::default()
    };
    Line::from(Span::styled(entry.name.clone(), style))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

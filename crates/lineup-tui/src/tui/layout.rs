// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// | Mode Tabs (1 row)                                 |
// +----------------+----------------+----------------+
// | Home           | Away           | Bench          |  drag mode
// +----------------+----------------+----------------+
// | Selectors (60%)              | Summary (40%)      |  dropdown mode
// +------------------------------+-------------------+
// | Auto-assign panel                                 |  auto mode
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The main area is shared; only the panels for the active mode are drawn.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use lineup_core::assignment::{Group, PlayerId};
use lineup_core::drag::{BoardView, DropTargets, DropZone};
use lineup_core::gesture::Point;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub mode_tabs: Rect,
    /// Area shared by the mode-specific panels.
    pub main: Rect,
    pub home: Rect,
    pub away: Rect,
    pub bench: Rect,
    pub selectors: Rect,
    pub summary: Rect,
    pub auto_panel: Rect,
    pub help_bar: Rect,
}

impl AppLayout {
    pub fn column(&self, group: Group) -> Rect {
        match group {
            Group::Home => self.home,
            Group::Away => self.away,
            Group::Bench => self.bench,
        }
    }
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(1), // mode tabs
            Constraint::Min(6),    // main
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let mode_tabs = vertical[1];
    let main = vertical[2];
    let help_bar = vertical[3];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(main);

    let dropdown = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main);

    AppLayout {
        status_bar,
        mode_tabs,
        main,
        home: columns[0],
        away: columns[1],
        bench: columns[2],
        selectors: dropdown[0],
        summary: dropdown[1],
        auto_panel: main,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Drop zones
// ---------------------------------------------------------------------------

/// The three board columns, in terminal cells, as drop targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneMap {
    pub home: Rect,
    pub away: Rect,
    pub bench: Rect,
}

impl ZoneMap {
    pub fn from_layout(layout: &AppLayout) -> Self {
        ZoneMap {
            home: layout.home,
            away: layout.away,
            bench: layout.bench,
        }
    }

    pub fn from_area(area: Rect) -> Self {
        Self::from_layout(&build_layout(area))
    }

    /// Column containing the given cell.
    pub fn group_at(&self, column: u16, row: u16) -> Option<Group> {
        let cell = Position::new(column, row);
        Group::ALL
            .into_iter()
            .find(|group| self.rect(*group).contains(cell))
    }

    /// Player drawn at the given cell. Rows start inside the column border.
    pub fn player_at(&self, column: u16, row: u16, board: &BoardView) -> Option<PlayerId> {
        let group = self.group_at(column, row)?;
        let rect = self.rect(group);
        let index = row.checked_sub(rect.y + 1)? as usize;
        board
            .container(group)
            .get(index)
            .map(|entry| entry.id.clone())
    }

    fn rect(&self, group: Group) -> Rect {
        match group {
            Group::Home => self.home,
            Group::Away => self.away,
            Group::Bench => self.bench,
        }
    }
}

impl DropTargets for ZoneMap {
    fn hit_test(&self, at: Point) -> Option<DropZone> {
        if at.x < 0.0 || at.y < 0.0 || at.x > f64::from(u16::MAX) || at.y > f64::from(u16::MAX) {
            return None;
        }
        self.group_at(at.x as u16, at.y as u16)
            .map(DropZone::container)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::assignment::{AssignmentStore, Player};

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("mode_tabs", layout.mode_tabs),
            ("home", layout.home),
            ("away", layout.away),
            ("bench", layout.bench),
            ("selectors", layout.selectors),
            ("summary", layout.summary),
            ("auto_panel", layout.auto_panel),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.mode_tabs.height, 1);
        assert_eq!(layout.help_bar.height, 1);
    }

    #[test]
    fn columns_are_side_by_side() {
        let layout = build_layout(test_area());
        assert!(layout.home.x < layout.away.x);
        assert!(layout.away.x < layout.bench.x);
        assert_eq!(layout.home.y, layout.bench.y);
        assert_eq!(layout.column(Group::Away), layout.away);
    }

    #[test]
    fn zone_map_hit_test() {
        let zones = ZoneMap::from_area(test_area());
        let home = zones.home;
        let inside = Point::new(f64::from(home.x + 2), f64::from(home.y + 2));
        assert_eq!(zones.hit_test(inside).map(|z| z.group()), Some(Group::Home));

        let bench = zones.bench;
        let inside = Point::new(f64::from(bench.x + 1), f64::from(bench.y + 1));
        assert_eq!(zones.hit_test(inside).map(|z| z.group()), Some(Group::Bench));

        // Status bar row is outside every column.
        assert_eq!(zones.hit_test(Point::new(5.0, 0.0)), None);
        assert_eq!(zones.hit_test(Point::new(-1.0, 5.0)), None);
    }

    #[test]
    fn player_at_maps_rows_to_entries() {
        let mut store = AssignmentStore::new(vec![
            Player::new("1", "Ana", ""),
            Player::new("2", "Bea", ""),
        ]);
        store.move_to(&PlayerId::from("2"), Group::Away);
        let board = BoardView::render(&store);
        let zones = ZoneMap::from_area(test_area());

        let bench = zones.bench;
        assert_eq!(
            zones.player_at(bench.x + 1, bench.y + 1, &board),
            Some(PlayerId::from("1"))
        );
        // Border row and rows past the last entry hold nobody.
        assert_eq!(zones.player_at(bench.x + 1, bench.y, &board), None);
        assert_eq!(zones.player_at(bench.x + 1, bench.y + 2, &board), None);

        let away = zones.away;
        assert_eq!(
            zones.player_at(away.x + 3, away.y + 1, &board),
            Some(PlayerId::from("2"))
        );
    }
}

// Drag surface adapter: turns recognized gestures into assignment moves and
// keeps the board's visual feedback (highlighted zone, floating preview) in step.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assignment::{AssignmentStore, Group, GroupCounts, PlayerId};
use crate::gesture::{GestureEvent, GestureRecognizer, InputSource, Point, RawInput};

/// Offset of the touch feedback marker from the finger.
pub const TOUCH_FEEDBACK_OFFSET_PX: f64 = 40.0;

// ---------------------------------------------------------------------------
// Drop zones
// ---------------------------------------------------------------------------

/// Description of the drop zone found under a point: the attributes the
/// group is resolved from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropZone {
    /// Explicit team attribute (`data-team`), if the zone carries one.
    pub team: Option<String>,
    /// Element id of the zone (e.g. `home-players`).
    pub id: Option<String>,
    /// Zone marker classes of the zone and its ancestors.
    pub classes: Vec<String>,
}

impl DropZone {
    /// Zone for a group's own container.
    pub fn container(group: Group) -> Self {
        DropZone {
            team: None,
            id: Some(group.container_id().to_string()),
            classes: Vec::new(),
        }
    }

    /// Resolve the target group: team attribute, then container id, then
    /// zone marker class. Anything unresolvable is the bench.
    pub fn group(&self) -> Group {
        if let Some(group) = self.team.as_deref().and_then(Group::from_str_group) {
            return group;
        }
        if let Some(id) = self.id.as_deref() {
            if let Some(group) = Group::ALL.into_iter().find(|g| g.container_id() == id) {
                return group;
            }
        }
        for class in &self.classes {
            match class.as_str() {
                "home-zone" | "local-zone" => return Group::Home,
                "away-zone" | "visitante-zone" => return Group::Away,
                _ => {}
            }
        }
        Group::Bench
    }
}

/// Hit testing against whatever surface renders the board.
pub trait DropTargets {
    /// The drop zone under `at`, or `None` when the point is outside every zone.
    fn hit_test(&self, at: Point) -> Option<DropZone>;
}

impl<F> DropTargets for F
where
    F: Fn(Point) -> Option<DropZone>,
{
    fn hit_test(&self, at: Point) -> Option<DropZone> {
        self(at)
    }
}

// ---------------------------------------------------------------------------
// Visual feedback
// ---------------------------------------------------------------------------

/// Floating copy of the dragged player that follows the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPreview {
    pub player: PlayerId,
    /// Top-left corner of the preview.
    pub at: Point,
    /// Field players keep their team styling; bench players use bench styling.
    pub field_style: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragFeedback {
    pub dragging: Option<PlayerId>,
    /// Zone currently showing the drag-over highlight.
    pub highlighted: Option<Group>,
    pub preview: Option<DragPreview>,
    /// Page scrolling is suppressed while a touch drag is in progress.
    pub scroll_locked: bool,
    /// Touch feedback ring. Shown on press, gone once the press turns into
    /// a drag or ends.
    pub touch_marker: Option<Point>,
}

/// One player element on the rendered board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub id: PlayerId,
    pub name: String,
    pub class: String,
}

/// The board as rendered from the store: three containers and their counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub home: Vec<BoardEntry>,
    pub away: Vec<BoardEntry>,
    pub bench: Vec<BoardEntry>,
    pub counts: GroupCounts,
}

impl BoardView {
    pub fn render(store: &AssignmentStore) -> Self {
        let entries = |group: Group| -> Vec<BoardEntry> {
            store
                .get_group(group)
                .iter()
                .map(|id| BoardEntry {
                    id: id.clone(),
                    name: store
                        .player(id)
                        .map(|p| p.name.clone())
                        .unwrap_or_default(),
                    class: group.element_class().to_string(),
                })
                .collect()
        };
        BoardView {
            home: entries(Group::Home),
            away: entries(Group::Away),
            bench: entries(Group::Bench),
            counts: store.counts(),
        }
    }

    pub fn container(&self, group: Group) -> &[BoardEntry] {
        match group {
            Group::Home => &self.home,
            Group::Away => &self.away,
            Group::Bench => &self.bench,
        }
    }

    /// Whether the board shows exactly what the store holds.
    pub fn matches(&self, store: &AssignmentStore) -> bool {
        Group::ALL.into_iter().all(|group| {
            let shown = self.container(group);
            let held = store.get_group(group);
            shown.len() == held.len()
                && shown.iter().zip(held).all(|(entry, id)| {
                    entry.id == *id && entry.class == group.element_class()
                })
        }) && self.counts == store.counts()
    }
}

// ---------------------------------------------------------------------------
// DragSurface
// ---------------------------------------------------------------------------

/// Result of feeding one raw input to the drag surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Nothing happened (no active gesture, or a tap).
    Idle,
    /// A press is being tracked but has not become a drag yet.
    Tracking,
    /// A drag is in progress over the given zone (or none).
    Hovering(Option<Group>),
    /// The drop landed on a zone and the player was reassigned.
    Moved {
        player: PlayerId,
        from: Group,
        to: Group,
    },
    /// The drop landed outside every zone; nothing moved.
    Missed,
}

/// Drag-and-drop adapter. Holds only transient gesture state and the
/// rendered board; the assignment itself lives in the store.
#[derive(Debug, Clone)]
pub struct DragSurface {
    recognizer: GestureRecognizer,
    preview_offset: f64,
    feedback: DragFeedback,
    board: BoardView,
}

impl DragSurface {
    pub fn new(threshold: f64, preview_offset: f64) -> Self {
        DragSurface {
            recognizer: GestureRecognizer::new(threshold),
            preview_offset,
            feedback: DragFeedback::default(),
            board: BoardView::default(),
        }
    }

    pub fn feedback(&self) -> &DragFeedback {
        &self.feedback
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    /// Re-render the board from the store.
    pub fn render(&mut self, store: &AssignmentStore) {
        self.board = BoardView::render(store);
    }

    /// Feed a raw input through gesture recognition and apply the result.
    pub fn handle(
        &mut self,
        input: RawInput,
        targets: &dyn DropTargets,
        store: &mut AssignmentStore,
    ) -> DragOutcome {
        let mut outcome = DragOutcome::Idle;
        for event in self.recognizer.feed(input) {
            outcome = self.apply(event, targets, store);
        }
        outcome
    }

    /// Abandon any press or drag in progress. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.recognizer.feed(RawInput::Cancel).is_empty();
        self.reset();
        was_active
    }

    fn apply(
        &mut self,
        event: GestureEvent,
        targets: &dyn DropTargets,
        store: &mut AssignmentStore,
    ) -> DragOutcome {
        match event {
            GestureEvent::Pressed { source, at, .. } => {
                if source == InputSource::Touch {
                    self.feedback.touch_marker = Some(
                        at.offset(-TOUCH_FEEDBACK_OFFSET_PX, -TOUCH_FEEDBACK_OFFSET_PX),
                    );
                }
                DragOutcome::Tracking
            }
            GestureEvent::DragStarted { source, player, at } => {
                let field_style = store.group_of(&player).is_some_and(|g| g.is_field());
                self.feedback.preview = Some(DragPreview {
                    player: player.clone(),
                    at: self.preview_corner(at),
                    field_style,
                });
                self.feedback.dragging = Some(player);
                self.feedback.scroll_locked = source == InputSource::Touch;
                self.feedback.touch_marker = None;
                self.hover(at, targets)
            }
            GestureEvent::DragMoved { at, .. } => {
                let corner = self.preview_corner(at);
                if let Some(preview) = self.feedback.preview.as_mut() {
                    preview.at = corner;
                }
                self.hover(at, targets)
            }
            GestureEvent::Dropped { player, at, .. } => {
                let zone = targets.hit_test(at);
                self.reset();
                match zone {
                    Some(zone) => {
                        let to = zone.group();
                        match store.move_to(&player, to) {
                            Some(from) => {
                                self.render(store);
                                DragOutcome::Moved { player, from, to }
                            }
                            None => DragOutcome::Idle,
                        }
                    }
                    None => {
                        debug!("Drop of {} landed outside every zone", player);
                        DragOutcome::Missed
                    }
                }
            }
            GestureEvent::Tapped { .. } | GestureEvent::Cancelled { .. } => {
                self.reset();
                DragOutcome::Idle
            }
        }
    }

    fn hover(&mut self, at: Point, targets: &dyn DropTargets) -> DragOutcome {
        let group = targets.hit_test(at).map(|zone| zone.group());
        self.feedback.highlighted = group;
        DragOutcome::Hovering(group)
    }

    fn preview_corner(&self, at: Point) -> Point {
        at.offset(-self.preview_offset, -self.preview_offset)
    }

    fn reset(&mut self) {
        self.feedback.dragging = None;
        self.feedback.highlighted = None;
        self.feedback.preview = None;
        self.feedback.scroll_locked = false;
        self.feedback.touch_marker = None;
    }
}

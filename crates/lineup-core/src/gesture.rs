// Gesture recognition shared by every input source.
//
// Mouse drag-and-drop and touch sequences are both reduced to the same
// normalized events (press, drag start, drag move, drop, tap, cancel) so the
// drag surface only has one reconciliation path.

use serde::{Deserialize, Serialize};

use crate::assignment::PlayerId;

/// Distance a touch must travel before it counts as a drag. Shorter
/// movements are taps or scroll jitter.
pub const DRAG_THRESHOLD_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    /// Mouse or pen driving native drag-and-drop.
    Pointer,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Raw input as delivered by a surface, before recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawInput {
    Start {
        source: InputSource,
        player: PlayerId,
        at: Point,
    },
    Move {
        at: Point,
    },
    End {
        at: Point,
    },
    Cancel,
}

/// Normalized gesture event.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Pressed {
        source: InputSource,
        player: PlayerId,
        at: Point,
    },
    DragStarted {
        source: InputSource,
        player: PlayerId,
        at: Point,
    },
    DragMoved {
        player: PlayerId,
        at: Point,
    },
    Dropped {
        source: InputSource,
        player: PlayerId,
        at: Point,
    },
    /// Released before ever becoming a drag.
    Tapped {
        player: PlayerId,
    },
    Cancelled {
        player: PlayerId,
    },
}

#[derive(Debug, Clone)]
struct ActiveGesture {
    source: InputSource,
    player: PlayerId,
    origin: Point,
    dragging: bool,
}

/// Turns raw start/move/end sequences into [`GestureEvent`]s.
///
/// Pointer gestures are drags from the first event. Touch gestures only
/// become drags once they have moved strictly more than `threshold` away
/// from where they started.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    threshold: f64,
    active: Option<ActiveGesture>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        GestureRecognizer::new(DRAG_THRESHOLD_PX)
    }
}

impl GestureRecognizer {
    pub fn new(threshold: f64) -> Self {
        GestureRecognizer {
            threshold,
            active: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Player currently being pressed or dragged.
    pub fn active_player(&self) -> Option<&PlayerId> {
        self.active.as_ref().map(|g| &g.player)
    }

    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(|g| g.dragging)
    }

    /// Feed one raw input, returning the events it produces (possibly none).
    pub fn feed(&mut self, input: RawInput) -> Vec<GestureEvent> {
        match input {
            RawInput::Start { source, player, at } => {
                let mut events = Vec::with_capacity(2);
                if let Some(previous) = self.active.take() {
                    events.push(GestureEvent::Cancelled {
                        player: previous.player,
                    });
                }
                let dragging = source == InputSource::Pointer;
                events.push(GestureEvent::Pressed {
                    source,
                    player: player.clone(),
                    at,
                });
                if dragging {
                    events.push(GestureEvent::DragStarted {
                        source,
                        player: player.clone(),
                        at,
                    });
                }
                self.active = Some(ActiveGesture {
                    source,
                    player,
                    origin: at,
                    dragging,
                });
                events
            }
            RawInput::Move { at } => {
                let Some(gesture) = self.active.as_mut() else {
                    return Vec::new();
                };
                let mut events = Vec::with_capacity(2);
                if !gesture.dragging && gesture.origin.distance_to(at) > self.threshold {
                    gesture.dragging = true;
                    events.push(GestureEvent::DragStarted {
                        source: gesture.source,
                        player: gesture.player.clone(),
                        at,
                    });
                }
                if gesture.dragging {
                    events.push(GestureEvent::DragMoved {
                        player: gesture.player.clone(),
                        at,
                    });
                }
                events
            }
            RawInput::End { at } => match self.active.take() {
                Some(gesture) if gesture.dragging => vec![GestureEvent::Dropped {
                    source: gesture.source,
                    player: gesture.player,
                    at,
                }],
                Some(gesture) => vec![GestureEvent::Tapped {
                    player: gesture.player,
                }],
                None => Vec::new(),
            },
            RawInput::Cancel => match self.active.take() {
                Some(gesture) => vec![GestureEvent::Cancelled {
                    player: gesture.player,
                }],
                None => Vec::new(),
            },
        }
    }
}

// Messages exchanged between the app loop and the terminal UI.

use lineup_core::assignment::{Group, GroupCounts, Player, PlayerId};
use lineup_core::auto_assign::AutoAssignment;
use lineup_core::controller::Mode;
use lineup_core::drag::{BoardView, DragFeedback};
use lineup_core::dropdown::{DropdownSummary, Selector};
use lineup_core::gesture::RawInput;

use crate::submit::SubmitReceipt;
use crate::tui::layout::ZoneMap;

/// Commands sent from the TUI to the app loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SwitchMode(Mode),
    /// Pointer input for the drag board, with the zone geometry it was
    /// captured against.
    Gesture { input: RawInput, zones: ZoneMap },
    Select { player: PlayerId, group: Group },
    AutoAssign,
    Save,
    Quit,
}

/// Updates pushed from the app loop to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    /// One-line message for the help bar.
    Status(String),
    /// The form was accepted; the session is over.
    Submitted(SubmitReceipt),
}

/// Everything the TUI needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSnapshot {
    pub mode: Option<Mode>,
    pub players: Vec<Player>,
    pub board: BoardView,
    pub feedback: DragFeedback,
    pub selectors: Vec<Selector>,
    pub summary: DropdownSummary,
    pub counts: GroupCounts,
    pub can_save: bool,
    pub auto_busy: bool,
    pub last_auto: Option<AutoAssignment>,
}

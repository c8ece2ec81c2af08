// Terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the controller's rendered state.
// The app loop pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use lineup_core::assignment::{GroupCounts, Player, PlayerId};
use lineup_core::auto_assign::AutoAssignment;
use lineup_core::controller::Mode;
use lineup_core::drag::{BoardView, DragFeedback};
use lineup_core::dropdown::{DropdownSummary, Selector};

use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};
use crate::submit::SubmitReceipt;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local copy of the state needed for rendering.
pub struct ViewState {
    pub mode: Mode,
    pub players: Vec<Player>,
    pub board: BoardView,
    pub feedback: DragFeedback,
    pub selectors: Vec<Selector>,
    pub summary: DropdownSummary,
    pub counts: GroupCounts,
    pub can_save: bool,
    pub auto_busy: bool,
    pub last_auto: Option<AutoAssignment>,
    /// Highlighted row in the selector table.
    pub selected_row: usize,
    /// A mouse button went down on a player and has not been released.
    pub pointer_active: bool,
    /// Last status message from the app loop.
    pub message: Option<String>,
    pub submitted: Option<SubmitReceipt>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            mode: Mode::Drag,
            players: Vec::new(),
            board: BoardView::default(),
            feedback: DragFeedback::default(),
            selectors: Vec::new(),
            summary: DropdownSummary::default(),
            counts: GroupCounts::default(),
            can_save: false,
            auto_busy: false,
            last_auto: None,
            selected_row: 0,
            pointer_active: false,
            message: None,
            submitted: None,
        }
    }
}

impl ViewState {
    /// Apply a full snapshot. Local fields (selection, pointer, message)
    /// are kept; the selected row is clamped to the new selector count.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        if let Some(mode) = snapshot.mode {
            if mode != self.mode {
                self.pointer_active = false;
            }
            self.mode = mode;
        }
        self.players = snapshot.players;
        self.board = snapshot.board;
        self.feedback = snapshot.feedback;
        self.selectors = snapshot.selectors;
        self.summary = snapshot.summary;
        self.counts = snapshot.counts;
        self.can_save = snapshot.can_save;
        self.auto_busy = snapshot.auto_busy;
        self.last_auto = snapshot.last_auto;
        self.selected_row = self
            .selected_row
            .min(self.selectors.len().saturating_sub(1));
    }

    /// Display name for a player id, falling back to the id itself.
    pub fn name_of<'a>(&'a self, id: &'a PlayerId) -> &'a str {
        self.players
            .iter()
            .find(|p| p.id == *id)
            .map(|p| p.name.as_str())
            .unwrap_or(id.as_str())
    }

    pub fn selected_player(&self) -> Option<&PlayerId> {
        self.selectors.get(self.selected_row).map(|s| &s.player)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Status(message) => {
            state.message = Some(message);
        }
        UiUpdate::Submitted(receipt) => {
            state.message = Some(format!(
                "Lineup saved at {}",
                receipt.submitted_at.format("%H:%M:%S")
            ));
            state.submitted = Some(receipt);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::status_bar::render_mode_tabs(frame, layout.mode_tabs, state);
    match state.mode {
        Mode::Drag => widgets::board::render(frame, &layout, state),
        Mode::Dropdown => {
            widgets::selectors::render(frame, layout.selectors, state);
            widgets::selectors::render_summary(frame, layout.summary, state);
        }
        Mode::Auto => widgets::auto_panel::render(frame, layout.auto_panel, state),
    }
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal and enables mouse capture.
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, terminal input, render ticks.
/// 4. Restores the terminal when the app loop closes its channel or the
///    user quits.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        let _ = ratatui::restore();
        default_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();
    // Area of the last drawn frame, used to place drop zones.
    let mut area = Rect::default();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App loop finished (quit or lineup submitted).
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        let zones = layout::ZoneMap::from_area(area);
                        input::handle_mouse(mouse_event, &mut view_state, zones)
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                };
                if let Some(command) = command {
                    let quit = command == UserCommand::Quit;
                    if cmd_tx.send(command).await.is_err() || quit {
                        break;
                    }
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| {
                    area = frame.area();
                    render_frame(frame, &view_state);
                })?;
            }
        }
    }

    execute!(std::io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Application state and orchestration logic.
//
// The central event loop that owns the mode controller, applies user commands
// from the TUI, fires the delayed auto-assign, and submits the lineup. After
// every change it pushes a fresh snapshot to the TUI render loop.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use lineup_core::config::Config;
use lineup_core::controller::{Mode, ModeController};
use lineup_core::drag::DragOutcome;
use lineup_core::submission::FormFieldNames;

use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};
use crate::submit::FormSubmitter;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub controller: ModeController,
    pub submitter: Arc<dyn FormSubmitter>,
    pub field_names: FormFieldNames,
    /// When the pending auto-assign run fires. `None` when idle.
    pub auto_deadline: Option<Instant>,
    pub rng: StdRng,
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The lineup was accepted; the editing session is over.
    Finished,
}

impl AppState {
    pub fn new(
        config: Config,
        controller: ModeController,
        submitter: Arc<dyn FormSubmitter>,
        rng: StdRng,
    ) -> Self {
        let field_names = FormFieldNames::from(&config.submit);
        AppState {
            config,
            controller,
            submitter,
            field_names,
            auto_deadline: None,
            rng,
        }
    }

    pub fn auto_delay(&self) -> Duration {
        Duration::from_millis(self.config.auto_assign.delay_ms)
    }

    /// Build the snapshot the TUI renders from.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let ctl = &self.controller;
        AppSnapshot {
            mode: Some(ctl.mode()),
            players: ctl.store().players().to_vec(),
            board: ctl.drag().board().clone(),
            feedback: ctl.drag().feedback().clone(),
            selectors: ctl.dropdown().selectors().to_vec(),
            summary: ctl.dropdown().summary().clone(),
            counts: ctl.store().counts(),
            can_save: ctl.can_save(),
            auto_busy: ctl.auto().is_busy(),
            last_auto: ctl.auto().last_result().cloned(),
        }
    }

    /// Start an auto-assign run and arm its timer.
    pub fn request_auto_assign(&mut self) -> Result<(), &'static str> {
        if self.controller.mode() != Mode::Auto {
            return Err("Switch to auto mode (3) to auto-assign");
        }
        if !self.controller.begin_auto_assign() {
            return Err(BUSY_MESSAGE);
        }
        self.auto_deadline = Some(Instant::now() + self.auto_delay());
        debug!("Auto-assign scheduled in {:?}", self.auto_delay());
        Ok(())
    }

    /// Complete the pending auto-assign run.
    pub fn complete_auto_assign(&mut self) {
        self.auto_deadline = None;
        if self.controller.finish_auto_assign(&mut self.rng).is_none() {
            warn!("Auto-assign timer fired with no run pending");
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on the command channel and the auto-assign timer using
/// `tokio::select!`. Returns when the user quits, the command channel
/// closes, or the lineup is submitted.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    loop {
        let deadline = state.auto_deadline;
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        if handle_user_command(&mut state, cmd, &ui_tx).await == Flow::Finished {
                            info!("Lineup submitted, ending session");
                            break;
                        }
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // The expression is evaluated even when the branch is disabled,
            // hence the fallback instant.
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                state.complete_auto_assign();
                send_snapshot(&state, &ui_tx).await;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

const BUSY_MESSAGE: &str = "Auto-assign in progress";

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
        .await;
}

async fn send_status(ui_tx: &mpsc::Sender<UiUpdate>, message: impl Into<String>) {
    let _ = ui_tx.send(UiUpdate::Status(message.into())).await;
}

/// Handle a user command from the TUI.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> Flow {
    match cmd {
        UserCommand::SwitchMode(mode) => {
            if state.controller.is_busy() {
                send_status(ui_tx, BUSY_MESSAGE).await;
            } else if state.controller.switch_mode(mode) {
                info!("Switched to {} mode", mode);
                send_snapshot(state, ui_tx).await;
            }
        }
        UserCommand::Gesture { input, zones } => {
            let outcome = state.controller.handle_gesture(input, &zones);
            if outcome == DragOutcome::Missed {
                debug!("Drop outside the board ignored");
            }
            // Feedback changes on every step of a drag, not only on drops.
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::Select { player, group } => {
            if state.controller.select(&player, group) {
                send_snapshot(state, ui_tx).await;
            }
        }
        UserCommand::AutoAssign => match state.request_auto_assign() {
            Ok(()) => send_snapshot(state, ui_tx).await,
            Err(message) => send_status(ui_tx, message).await,
        },
        UserCommand::Save => return save(state, ui_tx).await,
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
    Flow::Continue
}

/// Submit the lineup if both teams have players.
async fn save(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) -> Flow {
    if state.controller.is_busy() {
        send_status(ui_tx, BUSY_MESSAGE).await;
        return Flow::Continue;
    }
    let submission = match state.controller.submission() {
        Ok(submission) => submission,
        Err(e) => {
            info!("Save refused: {}", e);
            send_status(ui_tx, "Both teams need at least one player before saving").await;
            return Flow::Continue;
        }
    };

    let fields = submission.to_form_fields(&state.field_names);
    info!(
        "Saving lineup: {} home, {} away",
        submission.home.len(),
        submission.away.len()
    );
    match state.submitter.submit(&fields).await {
        Ok(receipt) => {
            let _ = ui_tx.send(UiUpdate::Submitted(receipt)).await;
            Flow::Finished
        }
        Err(e) => {
            warn!("Save failed: {}", e);
            send_status(ui_tx, format!("Save failed: {e}")).await;
            Flow::Continue
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

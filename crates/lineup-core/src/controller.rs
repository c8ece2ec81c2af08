// Mode controller: decides which surface takes user input and keeps every
// surface's rendered state in agreement with the assignment store.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assignment::{AssignmentStore, Group, PlayerId};
use crate::auto_assign::{AutoAssigner, AutoAssignment};
use crate::config::DragConfig;
use crate::drag::{DragOutcome, DragSurface, DropTargets};
use crate::dropdown::DropdownAdapter;
use crate::gesture::RawInput;
use crate::submission::{Submission, SubmissionError};

/// The surface currently accepting direct input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Drag,
    Dropdown,
    Auto,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Drag, Mode::Dropdown, Mode::Auto];

    pub fn from_str_mode(s: &str) -> Option<Mode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drag" => Some(Mode::Drag),
            "dropdown" => Some(Mode::Dropdown),
            "auto" => Some(Mode::Auto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Drag => "drag",
            Mode::Dropdown => "dropdown",
            Mode::Auto => "auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables the controller hands to its surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub initial_mode: Mode,
    pub touch_threshold_px: f64,
    pub preview_offset_px: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings {
            initial_mode: Mode::Drag,
            touch_threshold_px: crate::gesture::DRAG_THRESHOLD_PX,
            preview_offset_px: 30.0,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(drag: &DragConfig, initial_mode: Mode) -> Self {
        ControllerSettings {
            initial_mode,
            touch_threshold_px: drag.touch_threshold_px,
            preview_offset_px: drag.preview_offset_px,
        }
    }
}

/// Owns the store and the three surfaces.
///
/// Only the surface matching the active mode accepts input. Every mutation
/// is followed by a re-render of all surfaces, so after any call returns the
/// board, the selectors and the counters all show what the store holds.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    store: AssignmentStore,
    drag: DragSurface,
    dropdown: DropdownAdapter,
    auto: AutoAssigner,
    can_save: bool,
}

impl ModeController {
    pub fn new(store: AssignmentStore, settings: ControllerSettings) -> Self {
        let mut drag = DragSurface::new(settings.touch_threshold_px, settings.preview_offset_px);
        drag.render(&store);
        let dropdown = DropdownAdapter::new(&store);
        let can_save = store.can_save();
        info!(
            "Assignment loaded: {} players, mode {}",
            store.len(),
            settings.initial_mode
        );
        ModeController {
            mode: settings.initial_mode,
            store,
            drag,
            dropdown,
            auto: AutoAssigner::new(),
            can_save,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    pub fn drag(&self) -> &DragSurface {
        &self.drag
    }

    pub fn dropdown(&self) -> &DropdownAdapter {
        &self.dropdown
    }

    pub fn auto(&self) -> &AutoAssigner {
        &self.auto
    }

    pub fn can_save(&self) -> bool {
        self.can_save
    }

    pub fn get_group(&self, group: Group) -> &[PlayerId] {
        self.store.get_group(group)
    }

    /// Whether an auto-assignment run is pending. User input is refused
    /// until it completes.
    pub fn is_busy(&self) -> bool {
        self.auto.is_busy()
    }

    /// Switch the active surface. Returns `false` when `mode` is already
    /// active or an auto-assignment run is pending.
    pub fn switch_mode(&mut self, mode: Mode) -> bool {
        if mode == self.mode || self.is_busy() {
            return false;
        }
        debug!("Switching mode {} -> {}", self.mode, mode);
        if self.mode == Mode::Drag && self.drag.cancel() {
            debug!("Abandoned drag in progress");
        }
        self.mode = mode;
        match mode {
            Mode::Dropdown => self.dropdown.sync_from_store(&self.store),
            Mode::Drag => {
                self.dropdown.apply_to_store(&mut self.store);
            }
            Mode::Auto => {}
        }
        self.refresh();
        true
    }

    /// Feed drag input. Ignored unless the drag surface is active and idle.
    pub fn handle_gesture(&mut self, input: RawInput, targets: &dyn DropTargets) -> DragOutcome {
        if self.mode != Mode::Drag || self.is_busy() {
            return DragOutcome::Idle;
        }
        let outcome = self.drag.handle(input, targets, &mut self.store);
        if let DragOutcome::Moved { player, from, to } = &outcome {
            info!("Dragged player {} from {} to {}", player, from, to);
            self.refresh();
        }
        outcome
    }

    /// Change a player's selector. Ignored unless the dropdown surface is
    /// active and idle.
    pub fn select(&mut self, player: &PlayerId, group: Group) -> bool {
        if self.mode != Mode::Dropdown || self.is_busy() {
            return false;
        }
        if !self.dropdown.change(player, group, &mut self.store) {
            return false;
        }
        info!("Selected {} for player {}", group, player);
        self.refresh();
        true
    }

    /// Start an auto-assignment run. Returns `false` outside auto mode or
    /// while a run is already in progress.
    pub fn begin_auto_assign(&mut self) -> bool {
        self.mode == Mode::Auto && self.auto.begin()
    }

    /// Complete the run started by [`ModeController::begin_auto_assign`].
    pub fn finish_auto_assign<R: Rng>(&mut self, rng: &mut R) -> Option<AutoAssignment> {
        let result = self.auto.finish(rng, &mut self.store).cloned()?;
        self.refresh();
        Some(result)
    }

    /// Whether the board and the selectors both show the store contents.
    pub fn is_consistent(&self) -> bool {
        self.drag.board().matches(&self.store) && self.dropdown.matches(&self.store)
    }

    /// Capture the teams for submission.
    pub fn submission(&self) -> Result<Submission, SubmissionError> {
        Submission::from_store(&self.store)
    }

    /// Re-render every surface from the store and recompute save eligibility.
    fn refresh(&mut self) {
        self.drag.render(&self.store);
        self.dropdown.sync_from_store(&self.store);
        self.can_save = self.store.can_save();
        debug_assert!(self.is_consistent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Player;
    use crate::drag::{DragFeedback, DropZone};
    use crate::gesture::{InputSource, Point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    fn controller(mode: Mode) -> ModeController {
        let store = AssignmentStore::new(
            (1..=4)
                .map(|i| Player::new(format!("p{i}").as_str(), format!("Player {i}"), ""))
                .collect(),
        );
        ModeController::new(
            store,
            ControllerSettings {
                initial_mode: mode,
                ..ControllerSettings::default()
            },
        )
    }

    fn home_zone(_: Point) -> Option<DropZone> {
        Some(DropZone::container(Group::Home))
    }

    fn drop_on_home(ctl: &mut ModeController, player: &str) -> DragOutcome {
        ctl.handle_gesture(
            RawInput::Start {
                source: InputSource::Pointer,
                player: id(player),
                at: Point::new(0.0, 0.0),
            },
            &home_zone,
        );
        ctl.handle_gesture(RawInput::End { at: Point::new(0.0, 0.0) }, &home_zone)
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(Mode::from_str_mode("Dropdown"), Some(Mode::Dropdown));
        assert_eq!(Mode::from_str_mode("auto"), Some(Mode::Auto));
        assert_eq!(Mode::from_str_mode("voice"), None);
        for mode in Mode::ALL {
            assert_eq!(Mode::from_str_mode(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn switch_to_same_mode_is_noop() {
        let mut ctl = controller(Mode::Drag);
        assert!(!ctl.switch_mode(Mode::Drag));
        assert!(ctl.switch_mode(Mode::Dropdown));
        assert_eq!(ctl.mode(), Mode::Dropdown);
    }

    #[test]
    fn gestures_only_work_in_drag_mode() {
        let mut ctl = controller(Mode::Dropdown);
        assert_eq!(drop_on_home(&mut ctl, "p1"), DragOutcome::Idle);
        assert!(ctl.get_group(Group::Home).is_empty());

        ctl.switch_mode(Mode::Drag);
        assert!(matches!(drop_on_home(&mut ctl, "p1"), DragOutcome::Moved { .. }));
        assert_eq!(ctl.get_group(Group::Home), &[id("p1")]);
        assert_eq!(ctl.dropdown().value_of(&id("p1")), Some(Group::Home));
        assert!(ctl.is_consistent());
    }

    #[test]
    fn select_only_works_in_dropdown_mode() {
        let mut ctl = controller(Mode::Drag);
        assert!(!ctl.select(&id("p2"), Group::Away));
        ctl.switch_mode(Mode::Dropdown);
        assert!(ctl.select(&id("p2"), Group::Away));
        assert_eq!(ctl.get_group(Group::Away), &[id("p2")]);
        assert_eq!(ctl.drag().board().away.len(), 1);
        assert!(ctl.is_consistent());
    }

    #[test]
    fn can_save_is_recomputed_after_each_mutation() {
        let mut ctl = controller(Mode::Dropdown);
        assert!(!ctl.can_save());
        ctl.select(&id("p1"), Group::Home);
        assert!(!ctl.can_save());
        ctl.select(&id("p2"), Group::Away);
        assert!(ctl.can_save());
        assert!(ctl.submission().is_ok());
        ctl.select(&id("p2"), Group::Bench);
        assert!(!ctl.can_save());
        assert!(ctl.submission().is_err());
    }

    #[test]
    fn auto_assign_needs_auto_mode_and_resyncs_surfaces() {
        let mut ctl = controller(Mode::Drag);
        assert!(!ctl.begin_auto_assign());

        ctl.switch_mode(Mode::Auto);
        assert!(ctl.begin_auto_assign());
        assert!(!ctl.begin_auto_assign(), "busy while the run is pending");

        let mut rng = StdRng::seed_from_u64(11);
        let result = ctl.finish_auto_assign(&mut rng).unwrap();
        assert_eq!(result.home.len(), 2);
        assert_eq!(result.away.len(), 2);
        assert!(ctl.get_group(Group::Bench).is_empty());
        assert!(ctl.can_save());
        assert!(ctl.is_consistent());
        assert!(!ctl.auto().is_busy());
        assert!(ctl.finish_auto_assign(&mut rng).is_none());
    }

    #[test]
    fn dropdown_round_trip_preserves_store() {
        let mut ctl = controller(Mode::Drag);
        drop_on_home(&mut ctl, "p3");
        drop_on_home(&mut ctl, "p1");
        let before = ctl.store().snapshot();
        ctl.switch_mode(Mode::Dropdown);
        ctl.switch_mode(Mode::Drag);
        assert_eq!(ctl.store().snapshot(), before);
        assert!(ctl.is_consistent());
    }

    #[test]
    fn pending_auto_assign_blocks_user_input() {
        let mut ctl = controller(Mode::Auto);
        assert!(ctl.begin_auto_assign());
        assert!(ctl.is_busy());

        assert!(!ctl.switch_mode(Mode::Dropdown));
        assert_eq!(ctl.mode(), Mode::Auto);
        assert!(!ctl.select(&id("p1"), Group::Home));
        assert_eq!(drop_on_home(&mut ctl, "p1"), DragOutcome::Idle);
        assert_eq!(ctl.store().revision(), 0);

        let result = ctl.finish_auto_assign(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(ctl.get_group(Group::Home), result.home.as_slice());
        assert!(!ctl.is_busy());
        assert!(ctl.switch_mode(Mode::Dropdown));
    }

    #[test]
    fn leaving_drag_mode_abandons_the_gesture() {
        let mut ctl = controller(Mode::Drag);
        ctl.handle_gesture(
            RawInput::Start {
                source: InputSource::Touch,
                player: id("p1"),
                at: Point::new(0.0, 0.0),
            },
            &home_zone,
        );
        ctl.handle_gesture(RawInput::Move { at: Point::new(50.0, 0.0) }, &home_zone);
        assert_eq!(ctl.drag().feedback().dragging, Some(id("p1")));

        ctl.switch_mode(Mode::Dropdown);
        assert_eq!(ctl.drag().feedback(), &DragFeedback::default());

        ctl.switch_mode(Mode::Drag);
        let outcome = ctl.handle_gesture(RawInput::End { at: Point::new(50.0, 0.0) }, &home_zone);
        assert_eq!(outcome, DragOutcome::Idle);
        assert!(ctl.get_group(Group::Home).is_empty());
        assert_eq!(ctl.store().revision(), 0);
    }
}

// Keyboard and mouse input handling.
//
// Translates crossterm events into UserCommand messages for the app loop, or
// into local ViewState changes (row selection, pointer tracking).

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use lineup_core::assignment::Group;
use lineup_core::controller::Mode;
use lineup_core::gesture::{InputSource, Point, RawInput};

use super::layout::ZoneMap;
use super::ViewState;
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key should be forwarded to the app
/// loop, `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both press and release; act on press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('1') => Some(UserCommand::SwitchMode(Mode::Drag)),
        KeyCode::Char('2') => Some(UserCommand::SwitchMode(Mode::Dropdown)),
        KeyCode::Char('3') => Some(UserCommand::SwitchMode(Mode::Auto)),

        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected_row = view_state.selected_row.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let last = view_state.selectors.len().saturating_sub(1);
            view_state.selected_row = (view_state.selected_row + 1).min(last);
            None
        }

        KeyCode::Char('h') => select(view_state, Group::Home),
        KeyCode::Char('a') => select(view_state, Group::Away),
        KeyCode::Char('b') => select(view_state, Group::Bench),

        KeyCode::Char('g') => Some(UserCommand::AutoAssign),
        KeyCode::Char('s') => Some(UserCommand::Save),

        KeyCode::Esc if view_state.pointer_active => {
            view_state.pointer_active = false;
            Some(UserCommand::Gesture {
                input: RawInput::Cancel,
                zones: ZoneMap::default(),
            })
        }

        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

/// Set the highlighted selector. Only meaningful in dropdown mode.
fn select(view_state: &ViewState, group: Group) -> Option<UserCommand> {
    if view_state.mode != Mode::Dropdown {
        return None;
    }
    let player = view_state.selected_player()?.clone();
    Some(UserCommand::Select { player, group })
}

/// Handle a mouse event against the current board geometry.
///
/// A left press on a player starts a pointer gesture; drags and the release
/// are forwarded only while that gesture is active.
pub fn handle_mouse(
    mouse_event: MouseEvent,
    view_state: &mut ViewState,
    zones: ZoneMap,
) -> Option<UserCommand> {
    if view_state.mode != Mode::Drag {
        return None;
    }
    let at = Point::new(f64::from(mouse_event.column), f64::from(mouse_event.row));

    let input = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let player = zones.player_at(mouse_event.column, mouse_event.row, &view_state.board)?;
            view_state.pointer_active = true;
            RawInput::Start {
                source: InputSource::Pointer,
                player,
                at,
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if view_state.pointer_active => {
            RawInput::Move { at }
        }
        MouseEventKind::Up(MouseButton::Left) if view_state.pointer_active => {
            view_state.pointer_active = false;
            RawInput::End { at }
        }
        _ => return None,
    };

    Some(UserCommand::Gesture { input, zones })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

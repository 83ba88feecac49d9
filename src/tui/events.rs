//! Event handling - keyboard input processing

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use super::state::{EditorState, Mode};

/// World-units moved per keypress when dragging a node.
const DRAG_STEP: f64 = 20.0;
/// World-units panned per keypress.
const PAN_STEP: f64 = 40.0;

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextNode,
    PrevNode,
    DragNode,
    Pan,
    ZoomIn,
    ZoomOut,
    BeginConnect,
    ConfirmConnect,
    CancelConnect,
    CycleStatus,
    ToggleDimmed,
    None,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &mut EditorState) -> Action {
    // Global keybindings
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => return Action::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Action::Quit,

        (KeyModifiers::NONE, KeyCode::Tab) => {
            state.select_next();
            return Action::NextNode;
        }
        (KeyModifiers::SHIFT, KeyCode::BackTab) => {
            state.select_prev();
            return Action::PrevNode;
        }

        // '+' arrives shifted on most layouts.
        (KeyModifiers::NONE, KeyCode::Char('+'))
        | (KeyModifiers::SHIFT, KeyCode::Char('+'))
        | (KeyModifiers::NONE, KeyCode::Char('=')) => {
            state.viewport.zoom_in();
            return Action::ZoomIn;
        }
        (KeyModifiers::NONE, KeyCode::Char('-')) => {
            state.viewport.zoom_out();
            return Action::ZoomOut;
        }

        // Pan: Shift + arrows
        (KeyModifiers::SHIFT, KeyCode::Left) => {
            state.viewport.pan(-PAN_STEP, 0.0);
            return Action::Pan;
        }
        (KeyModifiers::SHIFT, KeyCode::Right) => {
            state.viewport.pan(PAN_STEP, 0.0);
            return Action::Pan;
        }
        (KeyModifiers::SHIFT, KeyCode::Up) => {
            state.viewport.pan(0.0, -PAN_STEP);
            return Action::Pan;
        }
        (KeyModifiers::SHIFT, KeyCode::Down) => {
            state.viewport.pan(0.0, PAN_STEP);
            return Action::Pan;
        }

        _ => {}
    }

    // Mode-specific keybindings
    match state.mode {
        Mode::Normal => match key.code {
            KeyCode::Char('c') => {
                state.begin_connect();
                return Action::BeginConnect;
            }
            KeyCode::Char('s') => {
                state.cycle_status();
                return Action::CycleStatus;
            }
            KeyCode::Char('d') => {
                state.toggle_dimmed();
                return Action::ToggleDimmed;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                state.move_selected(-DRAG_STEP, 0.0);
                return Action::DragNode;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                state.move_selected(DRAG_STEP, 0.0);
                return Action::DragNode;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                state.move_selected(0.0, -DRAG_STEP);
                return Action::DragNode;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.move_selected(0.0, DRAG_STEP);
                return Action::DragNode;
            }
            _ => {}
        },
        Mode::Connecting { .. } => match key.code {
            KeyCode::Enter => {
                state.confirm_connect();
                return Action::ConfirmConnect;
            }
            KeyCode::Esc => {
                state.cancel_connect();
                return Action::CancelConnect;
            }
            // While connecting, arrows walk the candidate targets.
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                state.select_prev();
                return Action::PrevNode;
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                state.select_next();
                return Action::NextNode;
            }
            _ => {}
        },
    }

    Action::None
}

/// Poll for keyboard events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::store::WorkflowStore;

    fn state() -> EditorState {
        EditorState::new(WorkflowStore::new(sample::nodes(), sample::edges()))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_action() {
        let mut state = state();
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &mut state), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut state), Action::Quit);
    }

    #[test]
    fn test_tab_cycles_selection() {
        let mut state = state();
        handle_key_event(press(KeyCode::Tab), &mut state);
        assert_eq!(state.selected.as_deref(), Some("2"));
    }

    #[test]
    fn test_arrow_drags_selected_node() {
        let mut state = state();
        let action = handle_key_event(press(KeyCode::Right), &mut state);
        assert_eq!(action, Action::DragNode);
        assert_eq!(state.store.node("1").unwrap().position.x, 120.0);
    }

    #[test]
    fn test_shift_arrow_pans_viewport() {
        let mut state = state();
        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(key, &mut state), Action::Pan);
        assert_eq!(state.viewport.offset_x, PAN_STEP);
        // The node itself did not move.
        assert_eq!(state.store.node("1").unwrap().position.x, 100.0);
    }

    #[test]
    fn test_connect_flow_via_keys() {
        let mut state = state();
        handle_key_event(press(KeyCode::Char('c')), &mut state);
        assert!(matches!(state.mode, Mode::Connecting { .. }));

        handle_key_event(press(KeyCode::Right), &mut state); // target "2"
        handle_key_event(press(KeyCode::Enter), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.store.edges().iter().any(|e| e.id == "1-2"));
    }

    #[test]
    fn test_esc_cancels_connect() {
        let mut state = state();
        handle_key_event(press(KeyCode::Char('c')), &mut state);
        handle_key_event(press(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.store.edges().len(), 2);
    }
}

//! Keyboard mapping
//!
//! Turns crossterm key events into actions. While the name prompt is
//! active, printable keys are text rather than shortcuts.

use crate::machine::MachineState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm (Enter, Space)
    Select,
    /// Typed character in the name prompt
    Char(char),
    /// Delete the last typed character
    Backspace,
    /// Start brewing (b)
    Brew,
    /// Give the reward (k)
    Reward,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Convert a keyboard event to an action for the current state
pub fn key_to_action(key: KeyEvent, state: MachineState) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    if state == MachineState::AwaitingName {
        return match key.code {
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) if !c.is_control() => KeyAction::Char(c),
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('k') if state == MachineState::AwaitingReward => KeyAction::Reward,
        KeyCode::Char('b') if state == MachineState::ReadyToBrew => KeyAction::Brew,

        KeyCode::Up | KeyCode::Char('k') => KeyAction::Up,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Down,
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Left,
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Right,

        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Select,

        _ => KeyAction::None,
    }
}

//! Key and mouse mapping from terminal events to intents.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// What the player asked for.
///
/// Game actions go straight to the session; the rest are handled by the
/// front end (cursor, share flow, music switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    Game(GameAction),
    /// Record a share click, then grant the reward.
    Share,
    ToggleMusic,
    /// Move the keyboard cursor to the next available tile.
    NextTile,
    PrevTile,
    /// Select the tile under the keyboard cursor.
    Confirm,
    /// Left click at a terminal cell.
    Pick { column: u16, row: u16 },
    Quit,
}

/// Map keyboard input to intents.
pub fn handle_key_event(key: KeyEvent) -> Option<InputIntent> {
    if should_quit(key) {
        return Some(InputIntent::Quit);
    }
    match key.code {
        // Cursor
        KeyCode::Tab | KeyCode::Right | KeyCode::Down => Some(InputIntent::NextTile),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Up => Some(InputIntent::PrevTile),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputIntent::Confirm),

        // Session
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputIntent::Game(GameAction::Restart)),
        KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(InputIntent::Game(GameAction::SwitchLevel))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => Some(InputIntent::Game(GameAction::NextLevel)),

        // Collaborators
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputIntent::Share),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(InputIntent::ToggleMusic),

        _ => None,
    }
}

/// Map mouse input to intents. Only left-button presses count.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<InputIntent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputIntent::Pick {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

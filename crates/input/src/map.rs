//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let KeyCode::Char(ch) = key.code else {
        return match key.code {
            KeyCode::Left => Some(GameAction::MoveLeft),
            KeyCode::Right => Some(GameAction::MoveRight),
            KeyCode::Down => Some(GameAction::SoftDrop),
            KeyCode::Up => Some(GameAction::Rotate),
            _ => None,
        };
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match ch.to_ascii_lowercase() {
        'a' | 'h' => Some(GameAction::MoveLeft),
        'd' | 'l' => Some(GameAction::MoveRight),
        's' | 'j' => Some(GameAction::SoftDrop),
        'w' | 'k' | 'x' => Some(GameAction::Rotate),
        ' ' => Some(GameAction::HardDrop),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(GameAction::SoftDrop));
        assert_eq!(key(KeyCode::Up), Some(GameAction::Rotate));
    }

    #[test]
    fn test_letter_keys_any_case() {
        assert_eq!(key(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Char('J')), Some(GameAction::SoftDrop));
        assert_eq!(key(KeyCode::Char('w')), Some(GameAction::Rotate));
        assert_eq!(key(KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(key(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(key(KeyCode::Char('p')), None);
    }

    #[test]
    fn test_ctrl_chords_are_not_actions() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}

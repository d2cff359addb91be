pub mod character_creation;
pub mod character_select;
pub mod meta_shop;
pub mod run_scene;

use crossterm::event::KeyCode;
use dungeon_raid::core::Action;
use dungeon_raid::dungeon::Direction;

/// Maps a key press to a run action. Arrows and WASD move, Enter/Space confirm,
/// Esc cancels (exit while exploring, flee while fighting).
pub fn key_to_action(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Action::Move(Direction::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            key_to_action(KeyCode::Char('w')),
            Some(Action::Move(Direction::Up))
        );
        assert_eq!(
            key_to_action(KeyCode::Left),
            Some(Action::Move(Direction::Left))
        );
        assert_eq!(
            key_to_action(KeyCode::Char('D')),
            Some(Action::Move(Direction::Right))
        );
    }

    #[test]
    fn test_confirm_and_cancel_keys() {
        assert_eq!(key_to_action(KeyCode::Enter), Some(Action::Confirm));
        assert_eq!(key_to_action(KeyCode::Char(' ')), Some(Action::Confirm));
        assert_eq!(key_to_action(KeyCode::Esc), Some(Action::Cancel));
        assert_eq!(key_to_action(KeyCode::Char('x')), None);
    }
}

//! Terminal key events → session input.

use crate::core::keyboard::Key;
use crate::world::session::GameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of handling one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// Leave the game loop immediately (Ctrl+C).
    Exit,
}

/// Player key bound to `code`, if any.
pub fn player_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Key::Up)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        _ => None,
    }
}

/// Translate a key event. `reports_releases` is true when the terminal
/// accepted the keyboard enhancement flags and will send release events.
pub fn translate(event: KeyEvent, reports_releases: bool) -> Option<GameInput> {
    if event.kind == KeyEventKind::Release {
        return player_key(event.code).map(GameInput::Release);
    }

    if let Some(key) = player_key(event.code) {
        return Some(if reports_releases {
            GameInput::PressLatched(key)
        } else {
            GameInput::Press(key)
        });
    }

    // Repeats of non-player keys would toggle pause/quit repeatedly
    if event.kind == KeyEventKind::Repeat {
        return None;
    }

    Some(match event.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') => GameInput::Pause,
        _ => GameInput::Other,
    })
}

/// Feed one key event into the session.
pub fn handle_key(
    event: KeyEvent,
    session: &mut crate::world::GameSession,
    reports_releases: bool,
) -> InputResult {
    if event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return InputResult::Exit;
    }
    if let Some(input) = translate(event, reports_releases) {
        session.process_input(input);
    }
    if session.should_quit {
        InputResult::Exit
    } else {
        InputResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_player_key_bindings() {
        assert_eq!(player_key(KeyCode::Up), Some(Key::Up));
        assert_eq!(player_key(KeyCode::Char(' ')), Some(Key::Up));
        assert_eq!(player_key(KeyCode::Char('a')), Some(Key::Left));
        assert_eq!(player_key(KeyCode::Right), Some(Key::Right));
        assert_eq!(player_key(KeyCode::Down), None);
    }

    #[test]
    fn test_press_depends_on_release_support() {
        let press = event(KeyCode::Left, KeyEventKind::Press);
        assert_eq!(translate(press, false), Some(GameInput::Press(Key::Left)));
        assert_eq!(translate(press, true), Some(GameInput::PressLatched(Key::Left)));
    }

    #[test]
    fn test_release_maps_only_player_keys() {
        let release = event(KeyCode::Up, KeyEventKind::Release);
        assert_eq!(translate(release, true), Some(GameInput::Release(Key::Up)));
        let other = event(KeyCode::Char('p'), KeyEventKind::Release);
        assert_eq!(translate(other, true), None);
    }

    #[test]
    fn test_control_keys() {
        let esc = event(KeyCode::Esc, KeyEventKind::Press);
        assert_eq!(translate(esc, false), Some(GameInput::Quit));
        let pause = event(KeyCode::Char('p'), KeyEventKind::Press);
        assert_eq!(translate(pause, false), Some(GameInput::Pause));
        let repeat = event(KeyCode::Char('p'), KeyEventKind::Repeat);
        assert_eq!(translate(repeat, false), None);
        let other = event(KeyCode::Enter, KeyEventKind::Press);
        assert_eq!(translate(other, false), Some(GameInput::Other));
    }
}

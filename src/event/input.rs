//! Input events: backend-independent key/scroll/resize representation.
//!
//! The app and the headless test pilot both speak [`InputEvent`]; the
//! crossterm mapping lives in [`from_crossterm`] so only the binary's event
//! loop touches the terminal backend.

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind, MouseEventKind};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A pressed key, reduced to what the portfolio app reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Esc,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// A single user input, already normalized away from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press.
    Key(Key),
    /// A scroll request in rows; positive scrolls content down (toward the
    /// end of the page), negative back up.
    Scroll(i32),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
}

/// Rows scrolled per mouse-wheel notch.
const WHEEL_STEP: i32 = 3;

/// Map a crossterm event to an [`InputEvent`].
///
/// Returns `None` for events the app ignores (key release/repeat, mouse
/// movement, focus changes).
pub fn from_crossterm(event: CtEvent) -> Option<InputEvent> {
    match event {
        CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
            let key = match key.code {
                KeyCode::Char(ch) => Key::Char(ch),
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::BackTab => Key::BackTab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Esc => Key::Esc,
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::PageUp => Key::PageUp,
                KeyCode::PageDown => Key::PageDown,
                KeyCode::Home => Key::Home,
                KeyCode::End => Key::End,
                _ => return None,
            };
            Some(InputEvent::Key(key))
        }
        CtEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(InputEvent::Scroll(WHEEL_STEP)),
            MouseEventKind::ScrollUp => Some(InputEvent::Scroll(-WHEEL_STEP)),
            _ => None,
        },
        CtEvent::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent};

    fn press(code: KeyCode) -> CtEvent {
        CtEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn maps_char_key() {
        assert_eq!(
            from_crossterm(press(KeyCode::Char('a'))),
            Some(InputEvent::Key(Key::Char('a')))
        );
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(from_crossterm(press(KeyCode::Enter)), Some(InputEvent::Key(Key::Enter)));
        assert_eq!(from_crossterm(press(KeyCode::Tab)), Some(InputEvent::Key(Key::Tab)));
        assert_eq!(from_crossterm(press(KeyCode::Down)), Some(InputEvent::Key(Key::Down)));
        assert_eq!(from_crossterm(press(KeyCode::Esc)), Some(InputEvent::Key(Key::Esc)));
    }

    #[test]
    fn ignores_unmapped_keys() {
        assert_eq!(from_crossterm(press(KeyCode::F(5))), None);
        assert_eq!(from_crossterm(press(KeyCode::Insert)), None);
    }

    #[test]
    fn maps_scroll_wheel() {
        let down = CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(from_crossterm(down), Some(InputEvent::Scroll(WHEEL_STEP)));

        let up = CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(from_crossterm(up), Some(InputEvent::Scroll(-WHEEL_STEP)));
    }

    #[test]
    fn ignores_mouse_clicks() {
        let click = CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(from_crossterm(click), None);
    }

    #[test]
    fn maps_resize() {
        assert_eq!(
            from_crossterm(CtEvent::Resize(100, 40)),
            Some(InputEvent::Resize { width: 100, height: 40 })
        );
    }
}

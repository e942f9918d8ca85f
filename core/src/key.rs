//! Logical key events fed to the composer.
//!
//! Hosts deliver platform key codes; the front crate resolves them into a
//! `KeyEvent` plus `Modifiers` before anything in this crate sees them.

/// Key event types that the composer can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input (letters, digits, punctuation)
    Char(char),
    /// Backspace key
    Backspace,
    /// Forward delete key
    Delete,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Space key (word boundary)
    Space,
    /// Enter/Return key (word boundary)
    Enter,
    /// Tab key (word boundary)
    Tab,
    /// Escape key (restore raw keystrokes)
    Escape,
    /// Anything the host could not map; always passed through untouched
    Unknown,
}

impl KeyEvent {
    /// Keys that move the caret or edit text outside the composer's view.
    pub fn moves_caret(&self) -> bool {
        matches!(
            self,
            KeyEvent::Delete
                | KeyEvent::Left
                | KeyEvent::Right
                | KeyEvent::Up
                | KeyEvent::Down
                | KeyEvent::Home
                | KeyEvent::End
                | KeyEvent::PageUp
                | KeyEvent::PageDown
        )
    }

    /// Character a word-boundary key leaves in the text field.
    pub fn boundary_char(&self) -> Option<char> {
        match self {
            KeyEvent::Space => Some(' '),
            KeyEvent::Enter => Some('\n'),
            KeyEvent::Tab => Some('\t'),
            _ => None,
        }
    }
}

/// Modifier state accompanying a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift or caps lock is active
    pub caps: bool,
    /// Control (or command) is held
    pub ctrl: bool,
}

impl Modifiers {
    pub fn new(caps: bool, ctrl: bool) -> Self {
        Self { caps, ctrl }
    }

    pub fn caps() -> Self {
        Self {
            caps: true,
            ctrl: false,
        }
    }

    pub fn ctrl() -> Self {
        Self {
            caps: false,
            ctrl: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_chars() {
        assert_eq!(KeyEvent::Space.boundary_char(), Some(' '));
        assert_eq!(KeyEvent::Enter.boundary_char(), Some('\n'));
        assert_eq!(KeyEvent::Char('a').boundary_char(), None);
    }

    #[test]
    fn test_caret_keys() {
        assert!(KeyEvent::Left.moves_caret());
        assert!(KeyEvent::Delete.moves_caret());
        assert!(!KeyEvent::Backspace.moves_caret());
        assert!(!KeyEvent::Unknown.moves_caret());
    }
}

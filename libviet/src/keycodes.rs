//! Host key codes.
//!
//! Key codes follow the macOS virtual key code table (ANSI layout), which
//! is what keyboard event taps report. Other hosts translate to these
//! before calling the engine, or pass the typed character as `mapped_char`.

use libviet_core::KeyEvent;

pub const A: u16 = 0x00;
pub const S: u16 = 0x01;
pub const D: u16 = 0x02;
pub const F: u16 = 0x03;
pub const H: u16 = 0x04;
pub const G: u16 = 0x05;
pub const Z: u16 = 0x06;
pub const X: u16 = 0x07;
pub const C: u16 = 0x08;
pub const V: u16 = 0x09;
pub const B: u16 = 0x0B;
pub const Q: u16 = 0x0C;
pub const W: u16 = 0x0D;
pub const E: u16 = 0x0E;
pub const R: u16 = 0x0F;
pub const Y: u16 = 0x10;
pub const T: u16 = 0x11;
pub const N1: u16 = 0x12;
pub const N2: u16 = 0x13;
pub const N3: u16 = 0x14;
pub const N4: u16 = 0x15;
pub const N6: u16 = 0x16;
pub const N5: u16 = 0x17;
pub const EQUAL: u16 = 0x18;
pub const N9: u16 = 0x19;
pub const N7: u16 = 0x1A;
pub const MINUS: u16 = 0x1B;
pub const N8: u16 = 0x1C;
pub const N0: u16 = 0x1D;
pub const RIGHT_BRACKET: u16 = 0x1E;
pub const O: u16 = 0x1F;
pub const U: u16 = 0x20;
pub const LEFT_BRACKET: u16 = 0x21;
pub const I: u16 = 0x22;
pub const P: u16 = 0x23;
pub const RETURN: u16 = 0x24;
pub const L: u16 = 0x25;
pub const J: u16 = 0x26;
pub const QUOTE: u16 = 0x27;
pub const K: u16 = 0x28;
pub const SEMICOLON: u16 = 0x29;
pub const BACKSLASH: u16 = 0x2A;
pub const COMMA: u16 = 0x2B;
pub const SLASH: u16 = 0x2C;
pub const N: u16 = 0x2D;
pub const M: u16 = 0x2E;
pub const PERIOD: u16 = 0x2F;
pub const TAB: u16 = 0x30;
pub const SPACE: u16 = 0x31;
pub const GRAVE: u16 = 0x32;
pub const DELETE: u16 = 0x33;
pub const ESCAPE: u16 = 0x35;
pub const HOME: u16 = 0x73;
pub const PAGE_UP: u16 = 0x74;
pub const FORWARD_DELETE: u16 = 0x75;
pub const END: u16 = 0x77;
pub const PAGE_DOWN: u16 = 0x79;
pub const LEFT: u16 = 0x7B;
pub const RIGHT: u16 = 0x7C;
pub const DOWN: u16 = 0x7D;
pub const UP: u16 = 0x7E;

/// Unshifted character for each printable key.
const PRINTABLE: &[(u16, char)] = &[
    (A, 'a'),
    (S, 's'),
    (D, 'd'),
    (F, 'f'),
    (H, 'h'),
    (G, 'g'),
    (Z, 'z'),
    (X, 'x'),
    (C, 'c'),
    (V, 'v'),
    (B, 'b'),
    (Q, 'q'),
    (W, 'w'),
    (E, 'e'),
    (R, 'r'),
    (Y, 'y'),
    (T, 't'),
    (N1, '1'),
    (N2, '2'),
    (N3, '3'),
    (N4, '4'),
    (N6, '6'),
    (N5, '5'),
    (EQUAL, '='),
    (N9, '9'),
    (N7, '7'),
    (MINUS, '-'),
    (N8, '8'),
    (N0, '0'),
    (RIGHT_BRACKET, ']'),
    (O, 'o'),
    (U, 'u'),
    (LEFT_BRACKET, '['),
    (I, 'i'),
    (P, 'p'),
    (L, 'l'),
    (J, 'j'),
    (QUOTE, '\''),
    (K, 'k'),
    (SEMICOLON, ';'),
    (BACKSLASH, '\\'),
    (COMMA, ','),
    (SLASH, '/'),
    (N, 'n'),
    (M, 'm'),
    (PERIOD, '.'),
    (GRAVE, '`'),
];

fn special(keycode: u16) -> Option<KeyEvent> {
    let event = match keycode {
        SPACE => KeyEvent::Space,
        RETURN => KeyEvent::Enter,
        TAB => KeyEvent::Tab,
        DELETE => KeyEvent::Backspace,
        ESCAPE => KeyEvent::Escape,
        FORWARD_DELETE => KeyEvent::Delete,
        LEFT => KeyEvent::Left,
        RIGHT => KeyEvent::Right,
        UP => KeyEvent::Up,
        DOWN => KeyEvent::Down,
        HOME => KeyEvent::Home,
        END => KeyEvent::End,
        PAGE_UP => KeyEvent::PageUp,
        PAGE_DOWN => KeyEvent::PageDown,
        _ => return None,
    };
    Some(event)
}

/// Character a key produces on a US QWERTY layout.
pub fn keycode_to_char(keycode: u16) -> Option<char> {
    PRINTABLE
        .iter()
        .find(|(code, _)| *code == keycode)
        .map(|&(_, ch)| ch)
}

/// Key code for a character on a US QWERTY layout (case-insensitive).
pub fn char_to_keycode(ch: char) -> Option<u16> {
    let lower = ch.to_ascii_lowercase();
    PRINTABLE
        .iter()
        .find(|(_, c)| *c == lower)
        .map(|&(code, _)| code)
}

/// Whether a host-reported character is text rather than a key function.
///
/// Control characters and the U+F700..U+F8FF range macOS uses for arrow and
/// function keys are not text.
pub fn is_printable(ch: char) -> bool {
    !ch.is_control() && !('\u{F700}'..='\u{F8FF}').contains(&ch)
}

/// Resolve a host key into a logical key event.
///
/// A printable character from the host's layout wins over the code, so
/// Dvorak or Colemak users get the letter they see on the key cap whatever
/// position reports it. Without one, editing and navigation keys are
/// identified by code and the rest fall back to US QWERTY.
pub fn resolve(keycode: u16, mapped_char: Option<char>) -> KeyEvent {
    match mapped_char.filter(|&c| is_printable(c)) {
        Some(' ') => KeyEvent::Space,
        Some(ch) => KeyEvent::Char(ch),
        None => special(keycode)
            .or_else(|| keycode_to_char(keycode).map(KeyEvent::Char))
            .unwrap_or(KeyEvent::Unknown),
    }
}

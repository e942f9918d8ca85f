//! Host side of the protocol.
//!
//! A platform integration (event tap, IME framework, terminal shim) only
//! needs three capabilities: hand a raw key to the engine, apply the
//! returned record to the focused text field, and reset on focus change.
//! `SimulatedField` implements them over an in-memory string and applies
//! records exactly as a real host must.

use crate::engine::Engine;
use crate::keycodes;
use libviet_core::{Action, WireResult};

/// A raw key as a host sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKey {
    pub keycode: u16,
    pub caps: bool,
    pub ctrl: bool,
    /// Character produced by the active keyboard layout
    pub ch: Option<char>,
}

impl RawKey {
    /// The key that types `ch` on a US layout.
    pub fn from_char(ch: char) -> Self {
        let keycode = match ch {
            ' ' => keycodes::SPACE,
            '\n' => keycodes::RETURN,
            '\t' => keycodes::TAB,
            _ => keycodes::char_to_keycode(ch).unwrap_or(u16::MAX),
        };
        Self {
            keycode,
            caps: ch.is_uppercase(),
            ctrl: false,
            ch: Some(ch),
        }
    }

    pub fn code(keycode: u16) -> Self {
        Self {
            keycode,
            caps: false,
            ctrl: false,
            ch: None,
        }
    }

    pub fn backspace() -> Self {
        Self::code(keycodes::DELETE)
    }

    pub fn escape() -> Self {
        Self::code(keycodes::ESCAPE)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// Capabilities a keyboard hook provides around the engine.
pub trait KeyboardHook {
    /// Deliver one key to the engine.
    fn feed_key(&mut self, key: RawKey) -> WireResult;

    /// Apply a record to the focused text field. When the key was not
    /// consumed, its normal effect follows the record's edit.
    fn apply_result(&mut self, key: &RawKey, result: &WireResult);

    /// Focus moved or the user switched applications.
    fn reset(&mut self);

    /// Feed a key and apply the outcome.
    fn press(&mut self, key: RawKey) -> WireResult {
        let result = self.feed_key(key);
        self.apply_result(&key, &result);
        result
    }
}

/// In-memory text field driven through the engine.
#[derive(Debug, Clone, Default)]
pub struct SimulatedField {
    engine: Engine,
    text: String,
}

impl SimulatedField {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Type a string key by key. `backspace` marks a backspace press.
    pub fn type_keys(&mut self, keys: &str, backspace: Option<char>) -> Vec<WireResult> {
        keys.chars()
            .map(|ch| {
                let key = if Some(ch) == backspace {
                    RawKey::backspace()
                } else {
                    RawKey::from_char(ch)
                };
                self.press(key)
            })
            .collect()
    }

    pub fn type_str(&mut self, keys: &str) -> Vec<WireResult> {
        self.type_keys(keys, None)
    }

    fn delete_back(&mut self, count: usize) {
        for _ in 0..count {
            if self.text.pop().is_none() {
                break;
            }
        }
    }
}

impl KeyboardHook for SimulatedField {
    fn feed_key(&mut self, key: RawKey) -> WireResult {
        self.engine
            .process_key(key.keycode, key.caps, key.ctrl, key.ch)
    }

    fn apply_result(&mut self, key: &RawKey, result: &WireResult) {
        if matches!(result.action(), Some(Action::Insert | Action::Replace)) {
            self.delete_back(usize::from(result.backspace));
            self.text.push_str(&result.text());
        }
        if result.key_consumed() || key.ctrl {
            return;
        }

        let typed = match key.ch.filter(|&c| keycodes::is_printable(c)) {
            Some(ch) => Some(ch),
            None => match key.keycode {
                keycodes::DELETE => return self.delete_back(1),
                keycodes::SPACE => Some(' '),
                keycodes::RETURN => Some('\n'),
                keycodes::TAB => Some('\t'),
                code => keycodes::keycode_to_char(code),
            },
        };
        if let Some(ch) = typed {
            if key.caps {
                self.text.extend(ch.to_uppercase());
            } else {
                self.text.push(ch);
            }
        }
    }

    fn reset(&mut self) {
        self.engine.clear_buffer();
        self.text.clear();
    }
}

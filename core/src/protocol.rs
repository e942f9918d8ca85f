//! Result protocol shared with host keyboard hooks.
//!
//! `TransformationResult` is the Rust-side value; `WireResult` is its
//! fixed 1028-byte C layout. Hosts on the other side of an FFI or
//! shared-memory boundary rely on the exact field offsets, so they are
//! asserted at compile time.

use crate::composer::Decision;
use serde::Serialize;

/// Code point slots in a wire record.
pub const MAX_OUTPUT: usize = 256;

/// Size of `WireResult` in bytes.
pub const WIRE_RESULT_SIZE: usize = 1028;

/// Bit 0 of `WireResult::flags`: the host must suppress the physical key.
pub const FLAG_KEY_CONSUMED: u8 = 0x01;

/// Largest output the `count` byte can describe.
const MAX_COUNT: usize = u8::MAX as usize;

/// What the host does with the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Action {
    None = 0,
    Insert = 1,
    Replace = 2,
}

impl Action {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Action::None),
            1 => Some(Action::Insert),
            2 => Some(Action::Replace),
            _ => None,
        }
    }
}

/// Outcome of one keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformationResult {
    pub action: Action,
    /// Characters to delete before inserting `output`
    pub backspace_count: u8,
    pub output: Vec<char>,
    pub key_consumed: bool,
}

impl TransformationResult {
    pub fn pass_through() -> Self {
        Self {
            action: Action::None,
            backspace_count: 0,
            output: Vec::new(),
            key_consumed: false,
        }
    }

    /// Pack a composer decision, truncating output and saturating the
    /// backspace count to what the wire record can carry.
    pub fn from_decision(decision: Decision) -> Self {
        let (action, backspace, text) = match decision {
            Decision::PassThrough => return Self::pass_through(),
            Decision::Insert(text) => (Action::Insert, 0, text),
            Decision::Replace { backspace, text } => (Action::Replace, backspace, text),
        };

        let output: Vec<char> = text.chars().take(MAX_COUNT).collect();
        if backspace == 0 && output.is_empty() {
            return Self::pass_through();
        }

        Self {
            action,
            backspace_count: u8::try_from(backspace).unwrap_or(u8::MAX),
            output,
            key_consumed: true,
        }
    }

    pub fn text(&self) -> String {
        self.output.iter().collect()
    }

    pub fn to_wire(&self) -> WireResult {
        let mut wire = WireResult::empty();
        for (slot, ch) in wire.chars.iter_mut().zip(&self.output) {
            *slot = u32::from(*ch);
        }
        wire.count = self.output.len().min(MAX_COUNT) as u8;
        wire.action = self.action as u8;
        wire.backspace = self.backspace_count;
        wire.flags = if self.key_consumed {
            FLAG_KEY_CONSUMED
        } else {
            0
        };
        wire
    }
}

impl From<&TransformationResult> for WireResult {
    fn from(result: &TransformationResult) -> Self {
        result.to_wire()
    }
}

/// Fixed-layout result record.
///
/// | offset | field       |
/// |--------|-------------|
/// | 0      | `chars`     |
/// | 1024   | `count`     |
/// | 1025   | `action`    |
/// | 1026   | `backspace` |
/// | 1027   | `flags`     |
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireResult {
    /// UTF-32 code points; only the first `count` are meaningful
    pub chars: [u32; MAX_OUTPUT],
    pub count: u8,
    pub action: u8,
    pub backspace: u8,
    pub flags: u8,
}

const _: () = {
    assert!(core::mem::size_of::<WireResult>() == WIRE_RESULT_SIZE);
    assert!(core::mem::align_of::<WireResult>() == 4);
    assert!(core::mem::offset_of!(WireResult, chars) == 0);
    assert!(core::mem::offset_of!(WireResult, count) == 1024);
    assert!(core::mem::offset_of!(WireResult, action) == 1025);
    assert!(core::mem::offset_of!(WireResult, backspace) == 1026);
    assert!(core::mem::offset_of!(WireResult, flags) == 1027);
};

impl WireResult {
    /// A pass-through record.
    pub const fn empty() -> Self {
        Self {
            chars: [0; MAX_OUTPUT],
            count: 0,
            action: Action::None as u8,
            backspace: 0,
            flags: 0,
        }
    }

    pub fn key_consumed(&self) -> bool {
        self.flags & FLAG_KEY_CONSUMED != 0
    }

    pub fn action(&self) -> Option<Action> {
        Action::from_u8(self.action)
    }

    /// Decoded output; invalid code points are skipped.
    pub fn text(&self) -> String {
        let count = usize::from(self.count).min(MAX_OUTPUT);
        self.chars[..count]
            .iter()
            .filter_map(|&cp| char::from_u32(cp))
            .collect()
    }

    /// In-memory image in native byte order, as a C host would read it.
    pub fn to_bytes(&self) -> [u8; WIRE_RESULT_SIZE] {
        let mut bytes = [0u8; WIRE_RESULT_SIZE];
        for (chunk, cp) in bytes.chunks_exact_mut(4).zip(&self.chars) {
            chunk.copy_from_slice(&cp.to_ne_bytes());
        }
        bytes[1024] = self.count;
        bytes[1025] = self.action;
        bytes[1026] = self.backspace;
        bytes[1027] = self.flags;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; WIRE_RESULT_SIZE]) -> Self {
        let mut wire = Self::empty();
        for (cp, chunk) in wire.chars.iter_mut().zip(bytes[..1024].chunks_exact(4)) {
            *cp = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        wire.count = bytes[1024];
        wire.action = bytes[1025];
        wire.backspace = bytes[1026];
        wire.flags = bytes[1027];
        wire
    }
}

impl Default for WireResult {
    fn default() -> Self {
        Self::empty()
    }
}

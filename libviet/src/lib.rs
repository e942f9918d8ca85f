//! # libviet
//!
//! Vietnamese Telex/VNI input method engine for native keyboard hooks,
//! built on libviet-core.
//!
//! Hosts either link the Rust API (`Engine`) or the C ABI in `ffi`, which
//! returns the fixed 1028-byte `WireResult` record.

pub mod config;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod host;
pub mod keycodes;

// Re-export the protocol and composition types from core
pub use libviet_core::{
    Action, Config, InputScheme, KeyEvent, Modifiers, Shortcut, ShortcutTable,
    TransformationResult, WireResult, FLAG_KEY_CONSUMED, MAX_OUTPUT, WIRE_RESULT_SIZE,
};

pub use config::{Delays, VietConfig, CONFIG_DIR_ENV};
pub use engine::Engine;
pub use error::ConfigError;
pub use host::{KeyboardHook, RawKey, SimulatedField};

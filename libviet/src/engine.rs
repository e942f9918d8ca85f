//! Engine API consumed by host keyboard hooks.
//!
//! `Engine` wraps a core `Session` with configuration, key code resolution
//! and an on/off switch. Every call is synchronous and bounded; the engine
//! never blocks on I/O after `initialize`.

use crate::config::VietConfig;
use crate::keycodes;
use libviet_core::{InputScheme, Modifiers, Session, TransformationResult, WireResult};
use tracing::{debug, trace};

/// Vietnamese input engine for one typing session.
#[derive(Debug, Clone)]
pub struct Engine {
    session: Session,
    config: VietConfig,
    enabled: bool,
}

impl Engine {
    /// Create an engine from the user's configuration file.
    ///
    /// A missing or malformed file is not an error; defaults are used.
    pub fn initialize() -> Self {
        Self::with_config(VietConfig::load_user())
    }

    /// Create an engine with default configuration and no file access.
    pub fn new() -> Self {
        Self::with_config(VietConfig::default())
    }

    pub fn with_config(config: VietConfig) -> Self {
        debug!(scheme = %config.scheme, "engine initialized");
        Self {
            session: Session::new(config.scheme, config.base.clone()),
            config,
            enabled: true,
        }
    }

    /// Process one key event and return the record the host applies.
    ///
    /// `mapped_char` is the character the host's keyboard layout produced,
    /// if known; it takes precedence over the QWERTY meaning of `keycode`.
    pub fn process_key(
        &mut self,
        keycode: u16,
        caps: bool,
        ctrl: bool,
        mapped_char: Option<char>,
    ) -> WireResult {
        self.process(keycode, caps, ctrl, mapped_char).to_wire()
    }

    /// Same as `process_key`, returning the unpacked result.
    pub fn process(
        &mut self,
        keycode: u16,
        caps: bool,
        ctrl: bool,
        mapped_char: Option<char>,
    ) -> TransformationResult {
        if !self.enabled {
            return TransformationResult::pass_through();
        }

        let key = keycodes::resolve(keycode, mapped_char);
        let result = self.session.process(key, Modifiers::new(caps, ctrl));
        trace!(
            keycode,
            caps,
            ctrl,
            action = result.action as u8,
            backspace = result.backspace_count,
            count = result.output.len(),
            "key processed"
        );
        result
    }

    /// Drop all session state (focus change, app switch).
    pub fn clear_buffer(&mut self) {
        self.session.clear();
    }

    /// Committed text plus the syllable in progress. Diagnostic only.
    pub fn get_full_buffer(&self) -> String {
        self.session.full_text()
    }

    pub fn scheme(&self) -> InputScheme {
        self.session.scheme()
    }

    /// Switch schemes. The syllable in progress stays in the field as shown.
    pub fn set_scheme(&mut self, scheme: InputScheme) {
        self.config.scheme = scheme;
        self.session.set_scheme(scheme);
        debug!(scheme = %scheme, "input scheme switched");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn composition on or off; while off every key passes through.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.session.discard_syllable();
            debug!(enabled, "engine toggled");
        }
        self.enabled = enabled;
    }

    pub fn config(&self) -> &VietConfig {
        &self.config
    }

    /// Apply a new configuration. A scheme change resets the syllable in
    /// progress like `set_scheme`.
    pub fn apply_config(&mut self, config: VietConfig) {
        self.session.set_config(config.base.clone());
        if config.scheme != self.session.scheme() {
            self.set_scheme(config.scheme);
        }
        self.config = config;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

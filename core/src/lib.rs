//! libviet-core
//!
//! Composition core shared by the libviet engine and its host integrations:
//! static Telex/VNI rule tables, the syllable model, the per-keystroke
//! composer state machine, the session buffer and the fixed-layout result
//! protocol.
//!
//! Nothing here touches the file system or a platform input API. Hosts hand
//! in logical key events and get back `TransformationResult`s.
//!
//! Public API:
//! - `InputScheme` / `RuleTable` - Telex and VNI keystroke rules
//! - `Syllable` - Letters, segments, tone placement and well-formedness
//! - `Composer` - Incremental, backspace-aware composition state machine
//! - `Session` - Composer plus committed text for one focus
//! - `ShortcutTable` - Abbreviations expanded at word boundaries
//! - `TransformationResult` / `WireResult` - Result protocol (1028-byte record)
//! - `Config` - Composition options
use serde::{Deserialize, Serialize};

pub mod chars;
pub use chars::{compose, Mark, Tone};

pub mod key;
pub use key::{KeyEvent, Modifiers};

pub mod rules;
pub use rules::{InputScheme, Rule, RuleTable};

pub mod syllable;
pub use syllable::{Letter, Segments, Syllable};

pub mod composer;
pub use composer::{Composer, ComposerState, Decision, Outcome, MAX_DRAFT_KEYS};

pub mod session;
pub use session::Session;

pub mod shortcut;
pub use shortcut::{Shortcut, ShortcutTable};

pub mod protocol;
pub use protocol::{
    Action, TransformationResult, WireResult, FLAG_KEY_CONSUMED, MAX_OUTPUT, WIRE_RESULT_SIZE,
};

/// Composition options independent of scheme and host.
///
/// Host-facing settings (scheme, injection delays) live in the front crate's
/// `VietConfig`, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Put the tone on the second vowel of open oa/oe/uy (hoà, thuý)
    pub modern_tone: bool,
    /// Accept f, j, w, z as initial consonants
    pub allow_foreign_consonants: bool,
    /// Escape replaces a transformed word with its raw keystrokes
    pub restore_on_escape: bool,
    /// On a word boundary, restore raw keystrokes of words that are not Vietnamese
    pub auto_restore: bool,
    /// Telex: a `w` starting a word stays `w` instead of becoming ư
    pub skip_w_shortcut: bool,
    /// Uppercase the first letter after `.`, `!` or `?` and a space, or after Enter
    pub auto_capitalize: bool,
    #[serde(skip_serializing_if = "ShortcutTable::is_empty")]
    pub shortcuts: ShortcutTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // hoà rather than hòa
            modern_tone: true,
            allow_foreign_consonants: false,
            restore_on_escape: true,
            // English words keep their diacritics unless asked
            auto_restore: false,
            skip_w_shortcut: false,
            auto_capitalize: false,
            shortcuts: ShortcutTable::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    // ========== Tone Placement ==========

    /// Switch between modern (hoà) and traditional (hòa) placement.
    pub fn set_modern_tone(&mut self, modern: bool) {
        self.modern_tone = modern;
    }

    pub fn is_modern_tone(&self) -> bool {
        self.modern_tone
    }

    // ========== Foreign Words ==========

    pub fn set_foreign_consonants(&mut self, allowed: bool) {
        self.allow_foreign_consonants = allowed;
    }

    /// Toggle English auto-restore on/off.
    pub fn toggle_auto_restore(&mut self) {
        self.auto_restore = !self.auto_restore;
    }

    pub fn set_skip_w_shortcut(&mut self, skip: bool) {
        self.skip_w_shortcut = skip;
    }

    // ========== Typing Aids ==========

    pub fn set_auto_capitalize(&mut self, enabled: bool) {
        self.auto_capitalize = enabled;
    }

    /// Add an abbreviation expanded under both schemes.
    pub fn add_shortcut(&mut self, trigger: &str, replacement: &str) {
        self.shortcuts.insert(trigger, Shortcut::new(replacement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.modern_tone);
        assert!(!config.allow_foreign_consonants);
        assert!(config.restore_on_escape);
        assert!(!config.auto_restore);
        assert!(!config.skip_w_shortcut);
        assert!(!config.auto_capitalize);
        assert!(config.shortcuts.is_empty());
    }

    #[test]
    fn test_config_toml_partial() {
        let config = Config::from_toml_str("modern_tone = false\n").unwrap();
        assert!(!config.modern_tone);
        assert!(config.restore_on_escape, "missing keys fall back to defaults");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = Config::default();
        config.toggle_auto_restore();
        config.set_foreign_consonants(true);
        config.set_auto_capitalize(true);
        config.add_shortcut("vn", "Việt Nam");
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_config_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compose.toml");

        let mut config = Config::default();
        config.set_modern_tone(false);
        config.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        assert!(!loaded.is_modern_tone());
    }
}

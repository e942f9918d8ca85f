//! Session buffer.
//!
//! A `Session` owns the composer for the syllable in progress and the text
//! committed since the host last cleared it. The committed text mirrors what
//! the host's text field received and exists for diagnostics and tests; it
//! plays no part in composition.

use crate::composer::{Composer, ComposerState};
use crate::key::{KeyEvent, Modifiers};
use crate::protocol::TransformationResult;
use crate::rules::InputScheme;
use crate::Config;
use tracing::debug;

/// Per-focus typing session.
#[derive(Debug, Clone)]
pub struct Session {
    composer: Composer,
    /// Text finalized by word boundaries
    committed: String,
}

impl Session {
    pub fn new(scheme: InputScheme, config: Config) -> Self {
        Self {
            composer: Composer::new(scheme, config),
            committed: String::new(),
        }
    }

    /// Feed one key and encode the composer's decision.
    pub fn process(&mut self, key: KeyEvent, modifiers: Modifiers) -> TransformationResult {
        let outcome = self.composer.consume(key, modifiers);
        if let Some(text) = outcome.commit {
            self.committed.push_str(&text);
        }
        if outcome.erase_committed {
            self.committed.pop();
        }
        TransformationResult::from_decision(outcome.decision)
    }

    /// Reset composer and committed text. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.composer.reset();
        self.committed.clear();
        debug!("session cleared");
    }

    /// Committed text followed by the syllable still being typed.
    pub fn full_text(&self) -> String {
        let mut text = self.committed.clone();
        text.push_str(&self.composer.preedit());
        text
    }

    pub fn committed_text(&self) -> &str {
        &self.committed
    }

    pub fn preedit(&self) -> String {
        self.composer.preedit()
    }

    pub fn state(&self) -> ComposerState {
        self.composer.state()
    }

    pub fn scheme(&self) -> InputScheme {
        self.composer.scheme()
    }

    /// End composition of the syllable in progress without a boundary.
    ///
    /// The host field still shows its letters, so they move to the
    /// committed text as they are.
    pub fn discard_syllable(&mut self) {
        self.keep_preedit();
        self.composer.reset();
    }

    /// Switch schemes; the syllable in progress stays as typed text.
    pub fn set_scheme(&mut self, scheme: InputScheme) {
        self.keep_preedit();
        self.composer.set_scheme(scheme);
    }

    fn keep_preedit(&mut self) {
        let preedit = self.composer.preedit();
        self.committed.push_str(&preedit);
    }

    pub fn config(&self) -> &Config {
        self.composer.config()
    }

    pub fn set_config(&mut self, config: Config) {
        self.composer.set_config(config);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(InputScheme::default(), Config::default())
    }
}

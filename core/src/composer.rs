//! Syllable composer: the per-keystroke state machine.
//!
//! Each key either appends a literal letter, applies a rule from the active
//! scheme's table, reverts a rule, or ends the word. Every mutation of the
//! draft is recorded as a `Step` holding the draft as it was before, so a
//! backspace can undo exactly one step.
//!
//! Decisions are computed by diffing the rendering before and after the
//! key: the host deletes everything after the common prefix and types the
//! rest. A plain append of the typed character is left to the host.

use crate::chars::{Mark, Tone};
use crate::key::{KeyEvent, Modifiers};
use crate::rules::{InputScheme, Rule, RuleTable};
use crate::syllable::{Letter, Syllable};
use crate::Config;
use tracing::{debug, trace};

/// Keystrokes a single draft may hold before it is flushed as committed text.
pub const MAX_DRAFT_KEYS: usize = 48;

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Observable state of the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// Nothing typed since the last reset
    Empty,
    /// Letters and marks, no tone yet
    Composing,
    /// The syllable carries a tone
    Toned,
    /// The last syllable was finalized by a boundary key
    Frozen,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::Empty
    }
}

/// What the host has to do with the text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the key through; the host applies it normally
    PassThrough,
    /// Suppress the key and type `text`
    Insert(String),
    /// Suppress the key, delete `backspace` characters, then type `text`
    Replace { backspace: usize, text: String },
}

impl Decision {
    /// Minimal edit turning `before` into `after` for a typed key.
    fn for_key(before: &[char], after: &[char], typed: Option<char>) -> Self {
        let prefix = before
            .iter()
            .zip(after)
            .take_while(|(a, b)| a == b)
            .count();
        let backspace = before.len() - prefix;
        let tail = &after[prefix..];

        if backspace == 0 {
            match (tail, typed) {
                ([], _) => Decision::PassThrough,
                ([only], Some(key)) if *only == key => Decision::PassThrough,
                _ => Decision::Insert(tail.iter().collect()),
            }
        } else {
            Decision::Replace {
                backspace,
                text: tail.iter().collect(),
            }
        }
    }

    /// Edit for a backspace; the host's own deletion covers the common case.
    fn for_backspace(before: &[char], after: &[char]) -> Self {
        if !before.is_empty() && after == &before[..before.len() - 1] {
            Decision::PassThrough
        } else {
            Self::for_key(before, after, None)
        }
    }

    pub fn consumes_key(&self) -> bool {
        !matches!(self, Decision::PassThrough)
    }
}

/// Result of one `consume` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub decision: Decision,
    /// Text finalized by this key (syllable plus boundary character)
    pub commit: Option<String>,
    /// A backspace ran past the draft into already committed text
    pub erase_committed: bool,
}

impl Outcome {
    fn pass_through() -> Self {
        Self::from(Decision::PassThrough)
    }
}

impl From<Decision> for Outcome {
    fn from(decision: Decision) -> Self {
        Self {
            decision,
            commit: None,
            erase_committed: false,
        }
    }
}

/// The word being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Draft {
    syllable: Syllable,
    /// Every key of the word as typed, reverted triggers included
    typed: Vec<char>,
    /// Position in `typed` of the key that caused a reversion
    revert: Option<usize>,
    /// Set by a reversion; the rest of the word is typed verbatim
    literal: bool,
}

/// Sentence tracking for auto-capitalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum SentenceEnd {
    #[default]
    Idle,
    /// `.`, `!` or `?` was just committed
    Punct,
    /// The next letter starts a sentence
    Armed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Literal,
    Transform,
    Revert,
}

#[derive(Debug, Clone)]
struct Step {
    /// Lowercased key that produced the step
    key: char,
    kind: StepKind,
    before: Draft,
}

/// Incremental composer for one syllable at a time.
#[derive(Debug, Clone)]
pub struct Composer {
    table: &'static RuleTable,
    config: Config,
    draft: Draft,
    history: Vec<Step>,
    frozen: bool,
    sentence: SentenceEnd,
}

impl Composer {
    pub fn new(scheme: InputScheme, config: Config) -> Self {
        Self {
            table: scheme.rules(),
            config,
            draft: Draft::default(),
            history: Vec::new(),
            frozen: false,
            sentence: SentenceEnd::Idle,
        }
    }

    pub fn scheme(&self) -> InputScheme {
        self.table.scheme
    }

    /// Switch schemes; the syllable in progress is discarded.
    pub fn set_scheme(&mut self, scheme: InputScheme) {
        self.table = scheme.rules();
        self.reset();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn state(&self) -> ComposerState {
        if self.draft.syllable.is_empty() {
            if self.frozen {
                ComposerState::Frozen
            } else {
                ComposerState::Empty
            }
        } else if self.draft.syllable.tone() != Tone::None {
            ComposerState::Toned
        } else {
            ComposerState::Composing
        }
    }

    /// Rendering of the syllable in progress.
    pub fn preedit(&self) -> String {
        self.draft.syllable.to_text(self.config.modern_tone)
    }

    /// Keys of the word in progress exactly as typed.
    pub fn raw_keys(&self) -> String {
        self.draft.typed.iter().collect()
    }

    /// Drop the syllable in progress without committing it.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.history.clear();
        self.frozen = false;
    }

    /// Process one key.
    pub fn consume(&mut self, key: KeyEvent, modifiers: Modifiers) -> Outcome {
        if modifiers.ctrl {
            return self.freeze(None);
        }

        match key {
            KeyEvent::Char(ch) => {
                let ch = if modifiers.caps {
                    ch.to_uppercase().next().unwrap_or(ch)
                } else {
                    ch
                };
                if self.table.is_composable(ch) {
                    let letter = self.sentence_start(ch);
                    self.compose(letter, ch)
                } else {
                    self.freeze(Some(ch))
                }
            }
            KeyEvent::Space | KeyEvent::Enter | KeyEvent::Tab => self.freeze(key.boundary_char()),
            KeyEvent::Backspace => {
                self.sentence = SentenceEnd::Idle;
                self.backspace()
            }
            KeyEvent::Escape => {
                self.sentence = SentenceEnd::Idle;
                self.escape()
            }
            KeyEvent::Unknown => Outcome::pass_through(),
            _ if key.moves_caret() => self.freeze(None),
            _ => Outcome::pass_through(),
        }
    }

    fn render(&self) -> Vec<char> {
        self.draft.syllable.render(self.config.modern_tone)
    }

    /// Uppercase the first letter of a sentence when auto-capitalizing.
    fn sentence_start(&mut self, ch: char) -> char {
        let armed = self.sentence == SentenceEnd::Armed;
        self.sentence = SentenceEnd::Idle;
        if armed && self.draft.syllable.is_empty() && ch.is_alphabetic() {
            ch.to_uppercase().next().unwrap_or(ch)
        } else {
            ch
        }
    }

    fn track_sentence(&mut self, boundary: Option<char>) {
        self.sentence = match boundary {
            _ if !self.config.auto_capitalize => SentenceEnd::Idle,
            Some('.' | '!' | '?') => SentenceEnd::Punct,
            Some('\n') => SentenceEnd::Armed,
            Some(' ') if self.sentence != SentenceEnd::Idle => SentenceEnd::Armed,
            _ => SentenceEnd::Idle,
        };
    }

    /// Apply `ch` to the draft; `key` is what the host would type itself.
    fn compose(&mut self, ch: char, key: char) -> Outcome {
        let mut commit = None;
        if self.draft.typed.len() >= MAX_DRAFT_KEYS {
            commit = Some(self.preedit());
            self.reset();
        }
        self.frozen = false;

        let before_text = self.render();
        let before = self.draft.clone();
        let kind = self.apply(ch);
        self.draft.typed = before.typed.clone();
        self.draft.typed.push(ch);
        if kind == StepKind::Revert {
            self.draft.revert = Some(before.typed.len());
        }
        trace!(kind = ?kind, letters = self.draft.syllable.len(), "draft updated");
        self.history.push(Step {
            key: ch.to_ascii_lowercase(),
            kind,
            before,
        });

        let decision = Decision::for_key(&before_text, &self.render(), Some(key));
        Outcome {
            decision,
            commit,
            erase_committed: false,
        }
    }

    fn apply(&mut self, ch: char) -> StepKind {
        if self.draft.literal {
            return self.push_literal(ch);
        }

        let key = ch.to_ascii_lowercase();
        if let Some(top) = self.history.last() {
            if top.kind == StepKind::Transform && top.key == key {
                let mut restored = top.before.clone();
                restored.literal = true;
                self.draft = restored;
                self.push_literal(ch);
                return StepKind::Revert;
            }
        }

        match self.table.lookup(key) {
            Some(Rule::Tone(tone)) => self.apply_tone(tone, ch),
            Some(rule @ Rule::Mark(targets)) => self.apply_mark(rule, targets, ch),
            Some(Rule::Stroke) => self.apply_stroke(ch),
            None => self.push_literal(ch),
        }
    }

    fn push_literal(&mut self, ch: char) -> StepKind {
        self.draft.syllable.push(Letter::literal(ch));
        StepKind::Literal
    }

    /// Take back an effect that is already present and type the key instead.
    fn revert_with(&mut self, ch: char, undo: impl FnOnce(&mut Syllable)) -> StepKind {
        undo(&mut self.draft.syllable);
        self.draft.literal = true;
        self.push_literal(ch);
        StepKind::Revert
    }

    /// Keep `candidate` if it is still Vietnamese, otherwise type the key.
    fn accept(&mut self, candidate: Syllable, ch: char) -> StepKind {
        if candidate.is_well_formed(&self.config) {
            self.draft.syllable = candidate;
            StepKind::Transform
        } else {
            self.push_literal(ch)
        }
    }

    fn apply_tone(&mut self, tone: Tone, ch: char) -> StepKind {
        let syllable = &self.draft.syllable;
        let has_nucleus = syllable
            .segments()
            .is_some_and(|seg| !seg.nucleus.is_empty());
        if !has_nucleus {
            return self.push_literal(ch);
        }

        let current = syllable.tone();
        if tone == Tone::None {
            if current == Tone::None {
                return self.push_literal(ch);
            }
        } else if current == tone {
            return self.revert_with(ch, |s| s.set_tone(Tone::None));
        }

        let mut candidate = syllable.clone();
        candidate.set_tone(tone);
        self.accept(candidate, ch)
    }

    fn apply_mark(&mut self, rule: Rule, targets: &[(char, Mark)], ch: char) -> StepKind {
        let syllable = &self.draft.syllable;
        let Some(seg) = syllable.segments() else {
            return self.push_literal(ch);
        };
        let letters = syllable.letters();
        let mut already: Option<(usize, bool)> = None;

        if rule.horns_pair() {
            let pair = seg
                .nucleus
                .clone()
                .zip(seg.nucleus.clone().skip(1))
                .find(|&(u, o)| letters[u].base == 'u' && letters[o].base == 'o');
            if let Some((u, o)) = pair {
                if letters[u].mark == Mark::Horn && letters[o].mark == Mark::Horn {
                    already = Some((u, true));
                } else {
                    let mut candidate = syllable.clone();
                    for index in [u, o] {
                        if let Some(letter) = candidate.letter_mut(index) {
                            letter.mark = Mark::Horn;
                        }
                    }
                    if candidate.is_well_formed(&self.config) {
                        return self.accept(candidate, ch);
                    }
                }
            }
        }

        for index in seg.nucleus.clone().rev() {
            let letter = letters[index];
            let Some(&(_, mark)) = targets
                .iter()
                .find(|&&(base, mark)| base == letter.base && mark.applies_to(base))
            else {
                continue;
            };
            if letter.mark == mark {
                if already.is_none() {
                    already = Some((index, false));
                }
                continue;
            }
            let mut candidate = syllable.clone();
            if let Some(target) = candidate.letter_mut(index) {
                target.mark = mark;
            }
            if candidate.is_well_formed(&self.config) {
                return self.accept(candidate, ch);
            }
        }

        if let Some((index, pair)) = already {
            return self.revert_with(ch, |s| {
                let span = if pair { index..index + 2 } else { index..index + 1 };
                for i in span {
                    if let Some(letter) = s.letter_mut(i) {
                        letter.mark = Mark::None;
                    }
                }
            });
        }

        let word_start = syllable.is_empty() && self.config.skip_w_shortcut;
        if seg.nucleus.is_empty() && seg.coda.is_empty() && !word_start && self.table.bare_horn(ch)
        {
            let mut candidate = syllable.clone();
            let upper = ch.is_uppercase();
            candidate.push(Letter::literal(if upper { 'U' } else { 'u' }).with_mark(Mark::Horn));
            return self.accept(candidate, ch);
        }

        self.push_literal(ch)
    }

    fn apply_stroke(&mut self, ch: char) -> StepKind {
        let syllable = &self.draft.syllable;
        let initial_d = syllable
            .segments()
            .is_some_and(|seg| seg.initial == (0..1) && syllable.letters()[0].base == 'd');
        if !initial_d {
            return self.push_literal(ch);
        }

        if syllable.letters()[0].stroke {
            return self.revert_with(ch, |s| {
                if let Some(d) = s.letter_mut(0) {
                    d.stroke = false;
                }
            });
        }

        let mut candidate = syllable.clone();
        if let Some(d) = candidate.letter_mut(0) {
            d.stroke = true;
        }
        self.accept(candidate, ch)
    }

    fn backspace(&mut self) -> Outcome {
        let Some(step) = self.history.pop() else {
            let erase = self.draft.syllable.is_empty();
            self.reset();
            return Outcome {
                decision: Decision::PassThrough,
                commit: None,
                erase_committed: erase,
            };
        };

        let before_text = self.render();
        self.draft = step.before;
        trace!(kind = ?step.kind, letters = self.draft.syllable.len(), "step undone");
        Decision::for_backspace(&before_text, &self.render()).into()
    }

    /// Whether the draft shows anything other than the keys typed.
    fn is_transformed(&self) -> bool {
        self.render() != self.draft.typed
    }

    /// Whether an English word was mistaken for Vietnamese and should be
    /// shown as typed.
    fn should_restore(&self) -> bool {
        let typed = &self.draft.typed;
        let is_tone = |c: char| {
            matches!(
                self.table.lookup(c.to_ascii_lowercase()),
                Some(Rule::Tone(_))
            )
        };

        // cursor, person, version: two different tone keys, then a vowel
        let tones_then_vowel = typed.windows(3).any(|w| {
            is_tone(w[0])
                && is_tone(w[1])
                && !w[0].eq_ignore_ascii_case(&w[1])
                && is_vowel(w[2])
        });
        if tones_then_vowel && self.is_transformed() {
            return true;
        }

        if let Some(at) = self.draft.revert {
            // ass, boss: short words keep the reverted form
            if typed.len() <= 4 {
                return false;
            }
            // issue, error, mirror
            let key = typed[at].to_ascii_lowercase();
            let trigger_again = typed[at + 1..]
                .iter()
                .any(|c| c.to_ascii_lowercase() == key);
            return typed.last().is_some_and(|&c| is_vowel(c)) || trigger_again;
        }

        self.is_transformed() && !self.draft.syllable.is_well_formed(&self.config)
    }

    /// Expansion of the word in progress if its keys spell a shortcut.
    fn expansion(&self) -> Option<String> {
        let typed: String = self.draft.typed.iter().collect();
        self.config.shortcuts.expand(&typed, self.table.scheme)
    }

    /// End the word, committing it together with the boundary character.
    fn freeze(&mut self, boundary: Option<char>) -> Outcome {
        if self.draft.syllable.is_empty() {
            self.frozen = boundary.is_some() || self.frozen;
            self.history.clear();
            self.track_sentence(boundary);
            return Outcome {
                decision: Decision::PassThrough,
                commit: boundary.map(String::from),
                erase_committed: false,
            };
        }

        let shown = self.render();
        let replacement = if boundary.is_none() {
            None
        } else if let Some(expanded) = self.expansion() {
            Some(expanded)
        } else if self.config.auto_restore && self.should_restore() {
            Some(self.raw_keys())
        } else {
            None
        };

        let replaced = replacement.is_some();
        let (mut text, decision) = match replacement {
            Some(word) => {
                let mut typed = word.clone();
                typed.extend(boundary);
                let decision = Decision::Replace {
                    backspace: shown.len(),
                    text: typed,
                };
                (word, decision)
            }
            None => (self.preedit(), Decision::PassThrough),
        };
        text.extend(boundary);

        debug!(replaced, letters = shown.len(), "syllable frozen");
        self.reset();
        self.frozen = true;
        self.track_sentence(boundary);
        Outcome {
            decision,
            commit: Some(text),
            erase_committed: false,
        }
    }

    fn escape(&mut self) -> Outcome {
        if !self.config.restore_on_escape || !self.is_transformed() {
            return self.freeze(None);
        }

        let shown = self.render();
        let raw = self.raw_keys();
        self.reset();
        self.frozen = true;
        Outcome {
            decision: Decision::Replace {
                backspace: shown.len(),
                text: raw.clone(),
            },
            commit: Some(raw),
            erase_committed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telex() -> Composer {
        Composer::new(InputScheme::Telex, Config::default())
    }

    fn type_keys(composer: &mut Composer, keys: &str) -> Vec<Outcome> {
        keys.chars()
            .map(|ch| composer.consume(KeyEvent::Char(ch), Modifiers::default()))
            .collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut c = telex();
        assert_eq!(c.state(), ComposerState::Empty);

        type_keys(&mut c, "cha");
        assert_eq!(c.state(), ComposerState::Composing);

        type_keys(&mut c, "o");
        type_keys(&mut c, "f");
        assert_eq!(c.state(), ComposerState::Toned);
        assert_eq!(c.preedit(), "chào");

        let out = c.consume(KeyEvent::Space, Modifiers::default());
        assert_eq!(c.state(), ComposerState::Frozen);
        assert_eq!(out.commit.as_deref(), Some("chào "));
        assert_eq!(out.decision, Decision::PassThrough);

        type_keys(&mut c, "a");
        assert_eq!(c.state(), ComposerState::Composing);
    }

    #[test]
    fn test_plain_letters_pass_through() {
        let mut c = telex();
        for out in type_keys(&mut c, "chao") {
            assert_eq!(out.decision, Decision::PassThrough);
        }
    }

    #[test]
    fn test_tone_replaces_suffix() {
        let mut c = telex();
        type_keys(&mut c, "chao");
        let out = c.consume(KeyEvent::Char('f'), Modifiers::default());
        assert_eq!(
            out.decision,
            Decision::Replace {
                backspace: 2,
                text: "ào".to_string()
            }
        );
    }

    #[test]
    fn test_bare_w_inserts_horned_u() {
        let mut c = telex();
        let out = type_keys(&mut c, "w").remove(0);
        assert_eq!(out.decision, Decision::Insert("ư".to_string()));
        type_keys(&mut c, "w");
        assert_eq!(c.preedit(), "w", "second w reverts to the literal key");
    }

    #[test]
    fn test_immediate_repeat_reverts() {
        let mut c = telex();
        type_keys(&mut c, "aa");
        assert_eq!(c.preedit(), "â");
        type_keys(&mut c, "a");
        assert_eq!(c.preedit(), "aa");
        type_keys(&mut c, "a");
        assert_eq!(c.preedit(), "aaa", "literal after reversion");
    }

    #[test]
    fn test_second_tone_replaces_first() {
        let mut c = telex();
        type_keys(&mut c, "as");
        type_keys(&mut c, "f");
        assert_eq!(c.preedit(), "à");
    }

    #[test]
    fn test_backspace_undoes_one_step() {
        let mut c = telex();
        type_keys(&mut c, "vieetj");
        assert_eq!(c.preedit(), "việt");

        let out = c.consume(KeyEvent::Backspace, Modifiers::default());
        assert_eq!(c.preedit(), "viêt");
        assert_eq!(
            out.decision,
            Decision::Replace {
                backspace: 2,
                text: "êt".to_string()
            }
        );

        let out = c.consume(KeyEvent::Backspace, Modifiers::default());
        assert_eq!(c.preedit(), "viê");
        assert_eq!(out.decision, Decision::PassThrough);
    }

    #[test]
    fn test_backspace_on_empty_erases_committed() {
        let mut c = telex();
        let out = c.consume(KeyEvent::Backspace, Modifiers::default());
        assert!(out.erase_committed);
        assert_eq!(out.decision, Decision::PassThrough);
    }

    #[test]
    fn test_ctrl_freezes_and_passes_through() {
        let mut c = telex();
        type_keys(&mut c, "as");
        let out = c.consume(KeyEvent::Char('c'), Modifiers::ctrl());
        assert_eq!(out.decision, Decision::PassThrough);
        assert_eq!(out.commit.as_deref(), Some("á"));
        assert_eq!(c.preedit(), "");
    }

    #[test]
    fn test_unknown_key_leaves_state() {
        let mut c = telex();
        type_keys(&mut c, "as");
        let out = c.consume(KeyEvent::Unknown, Modifiers::default());
        assert_eq!(out, Outcome::pass_through());
        assert_eq!(c.preedit(), "á");
    }

    #[test]
    fn test_escape_restores_raw() {
        let mut c = telex();
        type_keys(&mut c, "vieetj");
        let out = c.consume(KeyEvent::Escape, Modifiers::default());
        assert_eq!(
            out.decision,
            Decision::Replace {
                backspace: 4,
                text: "vieetj".to_string()
            }
        );
        assert_eq!(c.state(), ComposerState::Frozen);
    }

    #[test]
    fn test_auto_restore_on_boundary() {
        let config = Config {
            auto_restore: true,
            ..Config::default()
        };
        let mut c = Composer::new(InputScheme::Telex, config);
        type_keys(&mut c, "tesst");
        assert_eq!(c.preedit(), "test");
        // already shows the raw keys, nothing to restore
        let out = c.consume(KeyEvent::Space, Modifiers::default());
        assert_eq!(out.decision, Decision::PassThrough);

        type_keys(&mut c, "varia");
        assert_eq!(c.preedit(), "vaỉa");
        let out = c.consume(KeyEvent::Space, Modifiers::default());
        assert_eq!(
            out.decision,
            Decision::Replace {
                backspace: 4,
                text: "varia ".to_string()
            }
        );
        assert_eq!(out.commit.as_deref(), Some("varia "));
    }

    #[test]
    fn test_restore_keeps_every_typed_key() {
        let config = Config {
            auto_restore: true,
            ..Config::default()
        };
        let mut c = Composer::new(InputScheme::Telex, config);
        type_keys(&mut c, "versus");
        assert_eq!(c.raw_keys(), "versus");
        let out = c.consume(KeyEvent::Space, Modifiers::default());
        assert_eq!(out.commit.as_deref(), Some("versus "));

        type_keys(&mut c, "usser");
        assert_eq!(c.preedit(), "user");
        assert_eq!(c.raw_keys(), "usser");
        let out = c.consume(KeyEvent::Space, Modifiers::default());
        assert_eq!(out.decision, Decision::PassThrough, "reverted form is kept");
        assert_eq!(out.commit.as_deref(), Some("user "));
    }

    #[test]
    fn test_skip_w_shortcut() {
        let config = Config {
            allow_foreign_consonants: true,
            skip_w_shortcut: true,
            ..Config::default()
        };
        let mut c = Composer::new(InputScheme::Telex, config);
        let out = type_keys(&mut c, "w").remove(0);
        assert_eq!(out.decision, Decision::PassThrough);
        type_keys(&mut c, "as");
        assert_eq!(c.preedit(), "wá");

        c.reset();
        type_keys(&mut c, "tw");
        assert_eq!(c.preedit(), "tư", "only the first letter of a word is kept");
    }

    #[test]
    fn test_auto_capitalize_after_sentence_end() {
        let config = Config {
            auto_capitalize: true,
            ..Config::default()
        };
        let mut c = Composer::new(InputScheme::Telex, config);
        type_keys(&mut c, "xong.");
        c.consume(KeyEvent::Space, Modifiers::default());
        let out = type_keys(&mut c, "b").remove(0);
        assert_eq!(out.decision, Decision::Insert("B".to_string()));
        type_keys(&mut c, "an");
        assert_eq!(c.preedit(), "Ban");

        // a backspace cancels the pending capital
        c.consume(KeyEvent::Enter, Modifiers::default());
        c.consume(KeyEvent::Backspace, Modifiers::default());
        type_keys(&mut c, "a");
        assert_eq!(c.preedit(), "a");
    }

    #[test]
    fn test_shortcut_expands_on_boundary() {
        let mut config = Config::default();
        config.add_shortcut("ko", "không");
        let mut c = Composer::new(InputScheme::Telex, config);
        type_keys(&mut c, "ko");
        let out = c.consume(KeyEvent::Space, Modifiers::default());
        assert_eq!(
            out.decision,
            Decision::Replace {
                backspace: 2,
                text: "không ".to_string()
            }
        );
        assert_eq!(out.commit.as_deref(), Some("không "));

        type_keys(&mut c, "ko");
        let out = c.consume(KeyEvent::Char('c'), Modifiers::ctrl());
        assert_eq!(out.commit.as_deref(), Some("ko"), "no expansion without a boundary");
    }

    #[test]
    fn test_draft_is_bounded() {
        let mut c = telex();
        let keys: String = std::iter::repeat('b').take(MAX_DRAFT_KEYS).collect();
        type_keys(&mut c, &keys);
        let out = c.consume(KeyEvent::Char('b'), Modifiers::default());
        assert_eq!(out.commit.map(|t| t.chars().count()), Some(MAX_DRAFT_KEYS));
        assert_eq!(c.preedit(), "b");
    }

    #[test]
    fn test_scheme_switch_discards_draft() {
        let mut c = telex();
        type_keys(&mut c, "vie");
        c.set_scheme(InputScheme::Vni);
        assert_eq!(c.state(), ComposerState::Empty);
        assert_eq!(c.scheme(), InputScheme::Vni);
        type_keys(&mut c, "a1");
        assert_eq!(c.preedit(), "á");
    }
}

//! Static keystroke rule tables for the Telex and VNI schemes.
//!
//! A rule says what a trigger key does to the syllable being composed.
//! Keys absent from a table are literal letters. The tables carry no state
//! and are selected by `InputScheme`.

use crate::chars::{Mark, Tone};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keystroke operation for one trigger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Set the syllable tone; `Tone::None` removes it
    Tone(Tone),
    /// Put a mark on a vowel; lists each base vowel the key can target
    Mark(&'static [(char, Mark)]),
    /// Turn an initial `d` into `đ`
    Stroke,
}

impl Rule {
    /// The horn pair `uo` → `ươ` is reachable with this rule.
    pub fn horns_pair(&self) -> bool {
        match self {
            Rule::Mark(targets) => {
                targets.contains(&('u', Mark::Horn)) && targets.contains(&('o', Mark::Horn))
            }
            _ => false,
        }
    }
}

/// Supported transliteration schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputScheme {
    #[default]
    Telex,
    Vni,
}

impl InputScheme {
    pub fn rules(self) -> &'static RuleTable {
        match self {
            InputScheme::Telex => &TELEX,
            InputScheme::Vni => &VNI,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InputScheme::Telex => "telex",
            InputScheme::Vni => "vni",
        }
    }

    /// Numeric id used by the C ABI (0 = Telex, 1 = VNI).
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(InputScheme::Telex),
            1 => Some(InputScheme::Vni),
            _ => None,
        }
    }
}

impl fmt::Display for InputScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telex" => Ok(InputScheme::Telex),
            "vni" => Ok(InputScheme::Vni),
            other => Err(format!("unknown input scheme '{other}'")),
        }
    }
}

/// Rule table for one scheme.
#[derive(Debug)]
pub struct RuleTable {
    pub scheme: InputScheme,
    rules: &'static phf::Map<char, Rule>,
    /// Key that inserts `ư` when no vowel is there to take a horn
    bare_horn: Option<char>,
    /// Digits compose instead of ending the word
    digits_compose: bool,
}

impl RuleTable {
    /// Look up the rule for a key, case-insensitively.
    pub fn lookup(&self, key: char) -> Option<Rule> {
        self.rules.get(&key.to_ascii_lowercase()).copied()
    }

    pub fn bare_horn(&self, key: char) -> bool {
        self.bare_horn == Some(key.to_ascii_lowercase())
    }

    /// Whether the key belongs inside a syllable rather than ending it.
    pub fn is_composable(&self, key: char) -> bool {
        key.is_ascii_alphabetic() || (self.digits_compose && key.is_ascii_digit())
    }
}

const CIRCUMFLEX_A: &[(char, Mark)] = &[('a', Mark::Circumflex)];
const CIRCUMFLEX_E: &[(char, Mark)] = &[('e', Mark::Circumflex)];
const CIRCUMFLEX_O: &[(char, Mark)] = &[('o', Mark::Circumflex)];
const CIRCUMFLEX_ANY: &[(char, Mark)] = &[
    ('a', Mark::Circumflex),
    ('e', Mark::Circumflex),
    ('o', Mark::Circumflex),
];
const HORN: &[(char, Mark)] = &[('u', Mark::Horn), ('o', Mark::Horn)];
const HORN_OR_BREVE: &[(char, Mark)] = &[('u', Mark::Horn), ('o', Mark::Horn), ('a', Mark::Breve)];
const BREVE: &[(char, Mark)] = &[('a', Mark::Breve)];

static TELEX_RULES: phf::Map<char, Rule> = phf_map! {
    's' => Rule::Tone(Tone::Acute),
    'f' => Rule::Tone(Tone::Grave),
    'r' => Rule::Tone(Tone::Hook),
    'x' => Rule::Tone(Tone::Tilde),
    'j' => Rule::Tone(Tone::Dot),
    'z' => Rule::Tone(Tone::None),
    'a' => Rule::Mark(CIRCUMFLEX_A),
    'e' => Rule::Mark(CIRCUMFLEX_E),
    'o' => Rule::Mark(CIRCUMFLEX_O),
    'w' => Rule::Mark(HORN_OR_BREVE),
    'd' => Rule::Stroke,
};

static VNI_RULES: phf::Map<char, Rule> = phf_map! {
    '1' => Rule::Tone(Tone::Acute),
    '2' => Rule::Tone(Tone::Grave),
    '3' => Rule::Tone(Tone::Hook),
    '4' => Rule::Tone(Tone::Tilde),
    '5' => Rule::Tone(Tone::Dot),
    '0' => Rule::Tone(Tone::None),
    '6' => Rule::Mark(CIRCUMFLEX_ANY),
    '7' => Rule::Mark(HORN),
    '8' => Rule::Mark(BREVE),
    '9' => Rule::Stroke,
};

static TELEX: RuleTable = RuleTable {
    scheme: InputScheme::Telex,
    rules: &TELEX_RULES,
    bare_horn: Some('w'),
    digits_compose: false,
};

static VNI: RuleTable = RuleTable {
    scheme: InputScheme::Vni,
    rules: &VNI_RULES,
    bare_horn: None,
    digits_compose: true,
};

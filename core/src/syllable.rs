//! Syllable model: letters, derived segments, well-formedness and tone
//! placement.
//!
//! The syllable keeps its letters in typed order and a single
//! syllable-level tone. Segments (initial consonant, vowel nucleus, final
//! consonant) are re-derived on demand, so marks typed at the end of a word
//! can still find their vowel.

use crate::chars::{compose, Mark, Tone};
use crate::Config;
use std::ops::Range;

const INITIALS: &[&str] = &[
    "b", "c", "ch", "d", "đ", "g", "gh", "gi", "h", "k", "kh", "l", "m", "n", "ng", "ngh", "nh",
    "p", "ph", "qu", "r", "s", "t", "th", "tr", "v", "x",
];

const FOREIGN_INITIALS: &[&str] = &["f", "j", "w", "z"];

const FINALS: &[&str] = &["c", "ch", "m", "n", "ng", "nh", "p", "t"];

const STOP_FINALS: &[&str] = &["c", "ch", "p", "t"];

/// Nuclei of finished Vietnamese syllables, marks included, tone excluded.
const NUCLEI: &[&str] = &[
    "a", "ă", "â", "e", "ê", "i", "o", "ô", "ơ", "u", "ư", "y", // single
    "ai", "ao", "au", "ay", "âu", "ây", "eo", "êu", "ia", "iê", "iu", "oa", "oă", "oe", "oi",
    "ôi", "ơi", "oo", "ua", "uâ", "uê", "ui", "uô", "uơ", "uy", "ưa", "ưi", "ưu", "ươ", "yê",
    "iêu", "yêu", "oai", "oay", "oeo", "uây", "uôi", "uya", "uyê", "uyu", "ươi", "ươu",
];

/// Unmarked or half-marked nuclei seen while a word is still being typed.
const PENDING_NUCLEI: &[&str] = &[
    "ie", "ye", "uo", "ưo", "uơi", "ue", "ieu", "yeu", "uoi", "uou", "ưoi", "ưou", "uye", "uay",
];

/// Nuclei that end the syllable: no final consonant may follow them.
///
/// Unmarked `ua`, `oa`, `ie`, `uo`, `ye` and `uy` are absent because they
/// are also the half-typed forms of uâ, oă, iê, uô, yê and uy + final.
const OPEN_NUCLEI: &[&str] = &[
    "ai", "ao", "au", "ay", "âu", "ây", "eo", "êu", "ia", "iu", "oi", "ôi", "ơi", "ui", "uơ",
    "ưa", "ưi", "ưu", "iêu", "yêu", "oai", "oay", "oeo", "uây", "uôi", "uya", "uyu", "ươi", "ươu",
    "ieu", "yeu", "uoi", "uou", "ưoi", "ưou", "uơi", "uay",
];

/// One letter of a syllable as the user sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    /// Lowercase base letter (or the literal key for non-letters)
    pub base: char,
    pub mark: Mark,
    /// `đ`
    pub stroke: bool,
    pub upper: bool,
}

impl Letter {
    /// A letter exactly as typed.
    pub fn literal(ch: char) -> Self {
        let upper = ch.is_uppercase();
        let base = ch.to_lowercase().next().unwrap_or(ch);
        Self {
            base,
            mark: Mark::None,
            stroke: false,
            upper,
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.mark = mark;
        self
    }

    pub fn is_vowel(&self) -> bool {
        matches!(self.base, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
    }

    pub fn render(&self, tone: Tone) -> char {
        compose(self.base, self.mark, self.stroke, tone, self.upper)
    }

    /// Lowercase, toneless form used for table lookups.
    fn spelling(&self) -> char {
        compose(self.base, self.mark, self.stroke, Tone::None, false)
    }
}

/// Letter index ranges of the three parts of a syllable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    pub initial: Range<usize>,
    pub nucleus: Range<usize>,
    /// Final consonant(s)
    pub coda: Range<usize>,
}

/// A syllable under composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Syllable {
    letters: Vec<Letter>,
    tone: Tone,
}

impl Syllable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn letter_mut(&mut self, index: usize) -> Option<&mut Letter> {
        self.letters.get_mut(index)
    }

    pub fn push(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    /// Split into initial, nucleus and final.
    ///
    /// Returns `None` when a vowel follows the final consonant, which no
    /// Vietnamese syllable does. `gi` and `qu` keep their vowel in the
    /// initial when another vowel follows (gia, quê), not otherwise (gì).
    pub fn segments(&self) -> Option<Segments> {
        Self::split(&self.letters)
    }

    fn split(letters: &[Letter]) -> Option<Segments> {
        let n = letters.len();
        let mut i = 0;
        while i < n && !letters[i].is_vowel() {
            i += 1;
        }

        if i == 1 && i + 1 < n && letters[i + 1].is_vowel() {
            let head = letters[0];
            let glide = letters[i];
            let absorbs = !head.stroke
                && glide.mark == Mark::None
                && matches!((head.base, glide.base), ('q', 'u') | ('g', 'i'));
            if absorbs {
                i += 1;
            }
        }

        let initial = 0..i;
        let nucleus_start = i;
        while i < n && letters[i].is_vowel() {
            i += 1;
        }
        let nucleus = nucleus_start..i;
        let coda_start = i;
        while i < n && !letters[i].is_vowel() {
            i += 1;
        }
        if i < n {
            return None;
        }

        Some(Segments {
            initial,
            nucleus,
            coda: coda_start..n,
        })
    }

    /// Lowercase, toneless spelling of a letter range.
    pub fn spelling(&self, range: Range<usize>) -> String {
        self.letters[range].iter().map(Letter::spelling).collect()
    }

    /// Whether the syllable could still become (or already is) Vietnamese.
    pub fn is_well_formed(&self, config: &Config) -> bool {
        let Some(seg) = self.segments() else {
            return false;
        };

        let initial = self.spelling(seg.initial.clone());
        let initial_ok = initial.is_empty()
            || INITIALS.contains(&initial.as_str())
            || (config.allow_foreign_consonants && FOREIGN_INITIALS.contains(&initial.as_str()));
        if !initial_ok {
            return false;
        }

        let nucleus = self.spelling(seg.nucleus.clone());
        if !nucleus.is_empty()
            && !NUCLEI.contains(&nucleus.as_str())
            && !PENDING_NUCLEI.contains(&nucleus.as_str())
        {
            return false;
        }

        let coda = self.spelling(seg.coda.clone());
        if coda.is_empty() {
            return true;
        }
        if nucleus.is_empty()
            || OPEN_NUCLEI.contains(&nucleus.as_str())
            || !FINALS.contains(&coda.as_str())
        {
            return false;
        }
        !STOP_FINALS.contains(&coda.as_str()) || self.tone.fits_stop_final()
    }

    /// Index of the letter that carries the tone mark.
    pub fn tone_position(&self, modern: bool) -> Option<usize> {
        // A syllable broken by trailing letters keeps the placement of its
        // longest well-shaped prefix.
        let mut end = self.letters.len();
        let seg = loop {
            match Self::split(&self.letters[..end]) {
                Some(seg) if !seg.nucleus.is_empty() => break seg,
                _ if end == 0 => return None,
                _ => end -= 1,
            }
        };

        let nucleus = &self.letters[seg.nucleus.clone()];
        let start = seg.nucleus.start;
        if let Some(marked) = nucleus.iter().rposition(|l| l.mark != Mark::None) {
            return Some(start + marked);
        }

        let offset = match nucleus.len() {
            1 => 0,
            2 if !seg.coda.is_empty() => 1,
            2 => match (nucleus[0].base, nucleus[1].base) {
                // iê, yê, uô before their mark is typed
                ('i', 'e') | ('y', 'e') | ('u', 'o') => 1,
                ('o', 'a') | ('o', 'e') | ('u', 'y') => usize::from(modern),
                _ => 0,
            },
            _ => 1,
        };
        Some(start + offset)
    }

    /// Render into display characters.
    pub fn render(&self, modern: bool) -> Vec<char> {
        let toned = if self.tone == Tone::None {
            None
        } else {
            self.tone_position(modern)
        };
        self.letters
            .iter()
            .enumerate()
            .map(|(i, letter)| {
                let tone = if Some(i) == toned { self.tone } else { Tone::None };
                letter.render(tone)
            })
            .collect()
    }

    pub fn to_text(&self, modern: bool) -> String {
        self.render(modern).into_iter().collect()
    }
}

//! Vietnamese character composition.
//!
//! A composed letter is a base Latin letter plus at most one vowel mark and
//! at most one tone. Composition goes through Unicode NFC so every
//! precomposed form (ấ, ợ, Ữ, ...) comes out of the standard tables rather
//! than a hand-maintained 134-entry grid.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// The six Vietnamese tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Level tone (ngang), no mark
    #[default]
    None,
    /// Sắc
    Acute,
    /// Huyền
    Grave,
    /// Hỏi
    Hook,
    /// Ngã
    Tilde,
    /// Nặng
    Dot,
}

impl Tone {
    fn combining(self) -> Option<char> {
        match self {
            Tone::None => None,
            Tone::Acute => Some('\u{0301}'),
            Tone::Grave => Some('\u{0300}'),
            Tone::Hook => Some('\u{0309}'),
            Tone::Tilde => Some('\u{0303}'),
            Tone::Dot => Some('\u{0323}'),
        }
    }

    /// Stop finals (c, ch, p, t) only carry sắc or nặng.
    pub fn fits_stop_final(self) -> bool {
        matches!(self, Tone::None | Tone::Acute | Tone::Dot)
    }
}

/// Vowel diacritics other than tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    None,
    /// â ê ô
    Circumflex,
    /// ă
    Breve,
    /// ơ ư
    Horn,
}

impl Mark {
    fn combining(self) -> Option<char> {
        match self {
            Mark::None => None,
            Mark::Circumflex => Some('\u{0302}'),
            Mark::Breve => Some('\u{0306}'),
            Mark::Horn => Some('\u{031B}'),
        }
    }

    /// Whether this mark exists on the given base vowel in Vietnamese.
    pub fn applies_to(self, base: char) -> bool {
        match self {
            Mark::None => true,
            Mark::Circumflex => matches!(base, 'a' | 'e' | 'o'),
            Mark::Breve => base == 'a',
            Mark::Horn => matches!(base, 'o' | 'u'),
        }
    }
}

/// Compose a single code point from its parts.
///
/// `base` is a lowercase letter. Combinations NFC cannot collapse into one
/// code point fall back to the bare base letter.
pub fn compose(base: char, mark: Mark, stroke: bool, tone: Tone, upper: bool) -> char {
    if stroke && base == 'd' {
        return if upper { 'Đ' } else { 'đ' };
    }

    let base = if upper { base.to_ascii_uppercase() } else { base };
    let mut composed = std::iter::once(base)
        .chain(mark.combining())
        .chain(tone.combining())
        .nfc();

    match (composed.next(), composed.next()) {
        (Some(ch), None) => ch,
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_letters_pass_through() {
        assert_eq!(compose('a', Mark::None, false, Tone::None, false), 'a');
        assert_eq!(compose('b', Mark::None, false, Tone::None, true), 'B');
    }

    #[test]
    fn test_marks_and_tones() {
        assert_eq!(compose('a', Mark::Circumflex, false, Tone::Acute, false), 'ấ');
        assert_eq!(compose('a', Mark::Circumflex, false, Tone::Dot, false), 'ậ');
        assert_eq!(compose('o', Mark::Horn, false, Tone::Dot, false), 'ợ');
        assert_eq!(compose('u', Mark::Horn, false, Tone::Tilde, true), 'Ữ');
        assert_eq!(compose('a', Mark::Breve, false, Tone::Grave, false), 'ằ');
        assert_eq!(compose('e', Mark::Circumflex, false, Tone::Hook, false), 'ể');
        assert_eq!(compose('y', Mark::None, false, Tone::Dot, false), 'ỵ');
    }

    #[test]
    fn test_stroke() {
        assert_eq!(compose('d', Mark::None, true, Tone::None, false), 'đ');
        assert_eq!(compose('d', Mark::None, true, Tone::None, true), 'Đ');
        // stroke only exists on d
        assert_eq!(compose('t', Mark::None, true, Tone::None, false), 't');
    }

    #[test]
    fn test_mark_applicability() {
        assert!(Mark::Circumflex.applies_to('e'));
        assert!(!Mark::Circumflex.applies_to('u'));
        assert!(Mark::Horn.applies_to('u'));
        assert!(!Mark::Breve.applies_to('o'));
    }

    #[test]
    fn test_stop_final_tones() {
        assert!(Tone::Acute.fits_stop_final());
        assert!(Tone::Dot.fits_stop_final());
        assert!(!Tone::Grave.fits_stop_final());
        assert!(!Tone::Tilde.fits_stop_final());
    }
}

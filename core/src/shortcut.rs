//! Abbreviation shortcuts.
//!
//! A shortcut maps the keys of a whole word (`vn`, `ko`) to a replacement
//! (`Việt Nam`, `không`). The composer expands it when the word is ended by
//! a boundary key. Triggers match case-insensitively; the case the user
//! typed carries over to the replacement:
//!
//! - `vn` → `Việt Nam`
//! - `Vn` → `Việt Nam` (first letter capitalized)
//! - `VN` → `VIỆT NAM`

use crate::rules::InputScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Shortcut {
    pub replacement: String,
    /// Only expand under this scheme; `None` expands under both
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<InputScheme>,
}

impl Shortcut {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            scheme: None,
        }
    }

    pub fn for_scheme(mut self, scheme: InputScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    fn applies_to(&self, scheme: InputScheme) -> bool {
        self.scheme.map_or(true, |only| only == scheme)
    }
}

/// Shortcuts keyed by lowercase trigger.
///
/// Stored in TOML as a table of tables:
///
/// ```toml
/// [shortcuts.vn]
/// replacement = "Việt Nam"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(
    from = "BTreeMap<String, Shortcut>",
    into = "BTreeMap<String, Shortcut>"
)]
pub struct ShortcutTable {
    entries: BTreeMap<String, Shortcut>,
}

impl From<BTreeMap<String, Shortcut>> for ShortcutTable {
    fn from(map: BTreeMap<String, Shortcut>) -> Self {
        let mut table = Self::default();
        for (trigger, shortcut) in map {
            table.insert(&trigger, shortcut);
        }
        table
    }
}

impl From<ShortcutTable> for BTreeMap<String, Shortcut> {
    fn from(table: ShortcutTable) -> Self {
        table.entries
    }
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a shortcut. Empty triggers are ignored.
    pub fn insert(&mut self, trigger: &str, shortcut: Shortcut) -> Option<Shortcut> {
        let trigger = trigger.trim().to_lowercase();
        if trigger.is_empty() {
            return None;
        }
        self.entries.insert(trigger, shortcut)
    }

    pub fn remove(&mut self, trigger: &str) -> Option<Shortcut> {
        self.entries.remove(&trigger.to_lowercase())
    }

    pub fn lookup(&self, trigger: &str, scheme: InputScheme) -> Option<&Shortcut> {
        self.entries
            .get(&trigger.to_lowercase())
            .filter(|shortcut| shortcut.applies_to(scheme))
    }

    /// Replacement for `typed`, cased the way the trigger was typed.
    pub fn expand(&self, typed: &str, scheme: InputScheme) -> Option<String> {
        let shortcut = self.lookup(typed, scheme)?;
        Some(match_case(typed, &shortcut.replacement))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shortcut)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn match_case(typed: &str, replacement: &str) -> String {
    let letters: Vec<char> = typed.chars().filter(|c| c.is_alphabetic()).collect();
    let all_upper = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
    let first_upper = typed.chars().next().is_some_and(char::is_uppercase);

    if all_upper {
        replacement.to_uppercase()
    } else if first_upper {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ShortcutTable {
        let mut table = ShortcutTable::new();
        table.insert("vn", Shortcut::new("Việt Nam"));
        table.insert("ko", Shortcut::new("không"));
        table.insert("hn", Shortcut::new("Hà Nội").for_scheme(InputScheme::Vni));
        table
    }

    #[test]
    fn test_lookup_ignores_case() {
        let table = table();
        assert!(table.lookup("VN", InputScheme::Telex).is_some());
        assert!(table.lookup("vnn", InputScheme::Telex).is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_expand_follows_typed_case() {
        let table = table();
        let telex = InputScheme::Telex;
        assert_eq!(table.expand("ko", telex).as_deref(), Some("không"));
        assert_eq!(table.expand("Ko", telex).as_deref(), Some("Không"));
        assert_eq!(table.expand("KO", telex).as_deref(), Some("KHÔNG"));
        assert_eq!(table.expand("vn", telex).as_deref(), Some("Việt Nam"));
    }

    #[test]
    fn test_scheme_restriction() {
        let table = table();
        assert!(table.expand("hn", InputScheme::Telex).is_none());
        assert_eq!(
            table.expand("hn", InputScheme::Vni).as_deref(),
            Some("Hà Nội")
        );
    }

    #[test]
    fn test_insert_and_remove() {
        let mut table = ShortcutTable::new();
        assert!(table.insert("  ", Shortcut::new("x")).is_none());
        assert!(table.is_empty());
        table.insert("BTW", Shortcut::new("nhân tiện"));
        assert_eq!(table.iter().next().map(|(k, _)| k), Some("btw"));
        assert!(table.remove("Btw").is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            shortcuts: ShortcutTable,
        }
        let doc: Doc = toml::from_str(
            "[shortcuts.VN]\nreplacement = \"Việt Nam\"\n\n\
             [shortcuts.hn]\nreplacement = \"Hà Nội\"\nscheme = \"vni\"\n",
        )
        .unwrap();
        assert_eq!(doc.shortcuts.len(), 2);
        assert!(doc.shortcuts.lookup("vn", InputScheme::Telex).is_some());
        assert_eq!(
            doc.shortcuts.lookup("hn", InputScheme::Vni),
            Some(&Shortcut::new("Hà Nội").for_scheme(InputScheme::Vni))
        );
    }
}

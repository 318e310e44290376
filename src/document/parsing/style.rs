//! Paragraph style classification
//!
//! The paragraph `class` attribute (the Word paragraph style name) is the
//! only reliable structural signal in the export. Several historical style
//! names map to the same field; lookup is case-insensitive and unknown names
//! resolve to [`FieldKind::Unknown`] rather than failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Semantic meaning of a paragraph style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    NewEntry,
    Reference,
    Time,
    Position,
    Publication,
    Details,
    Note,
    Chart,
    Source,
    Translation,
    Ignored,
    Unknown,
}

/// Style marking the paragraph before an entry as original information
pub const ORIGINAL_INFORMATION_CLASS: &str = "1stjerne";

const BUILTIN_ALIASES: &[(&str, FieldKind)] = &[
    ("1nr", FieldKind::NewEntry),
    ("EfS-henvisning", FieldKind::Reference),
    ("EfSreference0", FieldKind::Reference),
    ("tidlefs", FieldKind::Reference),
    ("FormerEfsNo", FieldKind::Reference),
    ("tidspunkt", FieldKind::Time),
    ("Time", FieldKind::Time),
    ("position", FieldKind::Position),
    ("positioner", FieldKind::Position),
    ("positionerfelt", FieldKind::Position),
    ("Publication", FieldKind::Publication),
    ("Publications", FieldKind::Publication),
    ("publikationer", FieldKind::Publication),
    ("detaljer", FieldKind::Details),
    ("Details0", FieldKind::Details),
    ("Note", FieldKind::Note),
    ("anm", FieldKind::Note),
    ("kort", FieldKind::Chart),
    ("Chart", FieldKind::Chart),
    ("Charts0", FieldKind::Chart),
    ("sag", FieldKind::Source),
    ("Kilde", FieldKind::Source),
    ("Translation", FieldKind::Translation),
    ("efterret", FieldKind::Ignored),
    ("NoticestoMariners", FieldKind::Ignored),
    ("brdtekst", FieldKind::Ignored),
    ("MsoNormal", FieldKind::Ignored),
    (ORIGINAL_INFORMATION_CLASS, FieldKind::Ignored),
];

/// Lookup table from canonicalized style name to field kind
#[derive(Debug, Clone)]
pub struct StyleTable {
    aliases: HashMap<String, FieldKind>,
    ignored_prefixes: Vec<String>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(name, kind)| (canonical(name), *kind))
                .collect(),
            ignored_prefixes: vec!["1rom".to_string()],
        }
    }
}

fn canonical(class: &str) -> String {
    class.trim().to_lowercase()
}

impl StyleTable {
    /// Built-in table extended with extra aliases; extras win on conflict
    pub fn with_overrides<'a>(
        aliases: impl IntoIterator<Item = (&'a String, &'a FieldKind)>,
        ignored_prefixes: &[String],
    ) -> Self {
        let mut table = Self::default();
        for (name, kind) in aliases {
            table.aliases.insert(canonical(name), *kind);
        }
        table.ignored_prefixes = ignored_prefixes.iter().map(|p| canonical(p)).collect();
        table
    }

    /// Classes that are skipped silently before dispatch
    pub fn is_skipped(&self, class: &str) -> bool {
        let class = canonical(class);
        self.ignored_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && class.starts_with(prefix.as_str()))
    }

    pub fn classify(&self, class: &str) -> FieldKind {
        self.aliases
            .get(&canonical(class))
            .copied()
            .unwrap_or(FieldKind::Unknown)
    }
}

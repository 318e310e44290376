//! Reference to an earlier notice
//!
//! Written as `week/id year[, category]`, e.g. `48/877 2015 (gentagelse)`,
//! where the category is a Danish or English keyword or free text.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use super::super::html::{extract_text, remove_brackets, remove_last_period};
use super::super::models::*;
use crate::error::FieldError;

static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-\d]+/(?P<id>\d+) (?P<year>\d+),?(?P<category>.*)$").unwrap()
});

/// Field labels that are sometimes not wrapped in an `<i>` of their own
const FIELD_LABELS: &[&str] = &[
    "EfS reference.",
    "EfS-henvisning. ",
    "Tidligere EfS.",
    "Former EfS.",
];

const REPETITION: &[&str] = &[
    "gentagelse",
    "repetition",
    "gentagelse med ny tid",
    "repetition with new time",
];
const UPDATE: &[&str] = &["ajourført", "updated"];
const CANCELLATION: &[&str] = &["udgår", "cancelled"];

/// Matched groups of a reference line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    pub id: u32,
    pub year: i32,
    /// Free text after the year, brackets removed; `None` when blank
    pub category: Option<String>,
}

impl ReferenceMatch {
    pub fn parse(text: &str) -> Result<Self, FieldError> {
        let mismatch = || FieldError::Reference(text.to_string());
        let caps = REFERENCE_PATTERN.captures(text).ok_or_else(mismatch)?;
        let id = caps["id"].parse().map_err(|_| mismatch())?;
        let year = caps["year"].parse().map_err(|_| mismatch())?;
        if !(2000..=2099).contains(&year) {
            return Err(mismatch());
        }
        let category = remove_brackets(&caps["category"]);
        Ok(Self {
            id,
            year,
            category: (!category.is_empty()).then(|| category.to_string()),
        })
    }

    pub fn message_id(&self) -> String {
        format!("NM-{:03}-{:02}", self.id, self.year - 2000)
    }
}

/// Map a category keyword to a reference type; unrecognized text becomes the description
pub fn classify_category(category: Option<&str>) -> (ReferenceType, Option<String>) {
    let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) else {
        return (ReferenceType::Reference, None);
    };
    let key = category.to_lowercase();
    if REPETITION.contains(&key.as_str()) {
        (ReferenceType::Repetition, None)
    } else if UPDATE.contains(&key.as_str()) {
        (ReferenceType::Update, None)
    } else if CANCELLATION.contains(&key.as_str()) {
        (ReferenceType::Cancellation, None)
    } else {
        (ReferenceType::Reference, Some(category.to_string()))
    }
}

/// Strip the trailing period and any unwrapped field label
pub(crate) fn strip_reference_label(text: &str) -> String {
    let mut reference = remove_last_period(text).to_string();
    for label in FIELD_LABELS {
        if let Some(rest) = reference.strip_prefix(label) {
            reference = rest.trim().to_string();
        }
    }
    reference
}

pub fn parse_reference(text: &str, lang: Lang) -> Result<Reference, FieldError> {
    let matched = ReferenceMatch::parse(&strip_reference_label(text))?;
    let (reference_type, description) = classify_category(matched.category.as_deref());
    Ok(Reference {
        reference_type,
        target_message_id: matched.message_id(),
        description,
        lang,
    })
}

pub fn extract_reference(el: ElementRef<'_>, lang: Lang) -> Result<Reference, FieldError> {
    parse_reference(&extract_text(el), lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keyword() {
        let reference = parse_reference("1234/56 2056 (ajourført)", Lang::Da).unwrap();
        assert_eq!(reference.reference_type, ReferenceType::Update);
        assert_eq!(reference.target_message_id, "NM-056-56");
        assert_eq!(reference.description, None);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let cases = [
            ("48/877 2015 (Gentagelse).", ReferenceType::Repetition),
            ("48/877 2015, repetition with new time", ReferenceType::Repetition),
            ("48/877 2015 (UDGÅR)", ReferenceType::Cancellation),
            ("48/877 2015 (cancelled)", ReferenceType::Cancellation),
            ("48/877 2015 (Updated)", ReferenceType::Update),
        ];
        for (text, expected) in cases {
            let reference = parse_reference(text, Lang::Da).unwrap();
            assert_eq!(reference.reference_type, expected, "{text}");
            assert_eq!(reference.target_message_id, "NM-877-15");
        }
    }

    #[test]
    fn test_free_text_is_kept_as_description() {
        let reference = parse_reference("48/7 2016 (se også kort 101)", Lang::Da).unwrap();
        assert_eq!(reference.reference_type, ReferenceType::Reference);
        assert_eq!(reference.target_message_id, "NM-007-16");
        assert_eq!(reference.description.as_deref(), Some("se også kort 101"));
    }

    #[test]
    fn test_blank_category() {
        let reference = parse_reference("-/12 2015.", Lang::En).unwrap();
        assert_eq!(reference.reference_type, ReferenceType::Reference);
        assert_eq!(reference.description, None);
        assert_eq!(reference.lang, Lang::En);
    }

    #[test]
    fn test_unwrapped_labels_are_stripped() {
        for text in [
            "EfS-henvisning. 48/877 2015",
            "EfS reference. 48/877 2015",
            "Tidligere EfS. 48/877 2015 (gentagelse)",
            "Former EfS. 48/877 2015.",
        ] {
            let reference = parse_reference(text, Lang::Da).unwrap();
            assert_eq!(reference.target_message_id, "NM-877-15", "{text}");
        }
    }

    #[test]
    fn test_message_id_format() {
        for (id, year, expected) in [(1, 2000, "NM-001-00"), (42, 2009, "NM-042-09"), (1234, 2099, "NM-1234-99")] {
            let matched = ReferenceMatch::parse(&format!("1/{id} {year}")).unwrap();
            assert_eq!(matched.message_id(), expected);
        }
    }

    #[test]
    fn test_mismatch() {
        assert!(matches!(
            parse_reference("Se tidligere EfS", Lang::Da),
            Err(FieldError::Reference(_))
        ));
        // Year is mandatory
        assert!(parse_reference("1234/56 (ajourført)", Lang::Da).is_err());
        assert!(parse_reference("48/877 1999", Lang::Da).is_err());
    }
}

//! Title line extraction
//!
//! The first paragraph of an entry reads
//! `[number.] [(T)|(P).] area[. sub-area][. vicinity]. title.` with no
//! markup separating the parts, so the segments are assigned by position
//! and count alone.

use scraper::ElementRef;

use super::super::html::{extract_text, extract_text_with, first_span, skipping};
use super::super::models::*;

/// Components of a title line, in the order they were consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine {
    pub message_type: MessageType,
    /// Outermost area first; one or two segments
    pub area: Vec<String>,
    pub vicinity: Option<String>,
    pub title: String,
}

/// Split the title line on `.` and assign the segments left to right
///
/// Two area segments are taken only when more than two segments remain, and
/// a vicinity only when more than four remain after that.
pub fn parse_title_line(text: &str) -> TitleLine {
    let parts: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let mut i = 0;
    let mut message_type = MessageType::Permanent;
    if let Some(&part) = parts.first() {
        if part == "(T)" || part == "(P)" {
            message_type = if part.contains('T') {
                MessageType::Temporary
            } else {
                MessageType::Preliminary
            };
            i += 1;
        }
    }

    let remaining = parts.len() - i;
    let area_parts = if remaining > 2 { 2 } else { remaining.min(1) };
    let area: Vec<String> = parts[i..i + area_parts]
        .iter()
        .map(|part| part.to_string())
        .collect();
    i += area_parts;

    let remaining = parts.len() - i;
    let vicinity = if remaining > 4 {
        i += 1;
        Some(parts[i - 1].to_string())
    } else {
        None
    };

    let title = parts[i..]
        .iter()
        .map(|part| format!("{part}."))
        .collect::<Vec<_>>()
        .join(" ");

    TitleLine {
        message_type,
        area,
        vicinity,
        title,
    }
}

/// Read the series identifier from the first span of the entry paragraph
///
/// Translations have no identifier span, or an empty one. Returns the number
/// and the span holding it, so the caller can leave it out of the title.
pub(crate) fn extract_identifier(el: ElementRef<'_>) -> Option<(u32, ElementRef<'_>)> {
    let span = first_span(el)?;
    let id = extract_text(span).replace('.', "");
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    id.parse().ok().map(|number| (number, span))
}

/// Extract the identifier and the title line components of an entry paragraph
pub fn extract_title_line(el: ElementRef<'_>) -> (Option<u32>, TitleLine) {
    match extract_identifier(el) {
        Some((number, span)) => {
            let skipped = [span];
            let text = extract_text_with(el, &skipping(&skipped));
            (Some(number), parse_title_line(&text))
        }
        None => (None, parse_title_line(&extract_text(el))),
    }
}

//! Document segmentation
//!
//! Walks the paragraphs of the message container in order and folds them
//! into draft messages. Each paragraph is dispatched on its style class: an
//! entry paragraph opens a new message, field paragraphs mutate the open
//! message, and a source or translation paragraph closes it. Paragraphs that
//! arrive with no open message, or carry an unknown class, are logged and
//! skipped.

use scraper::ElementRef;
use tracing::{debug, warn};

use super::super::html::{
    extract_text, extract_text_preserve_line_break, extract_text_with, field_label,
    inner_html_with, remove_brackets, skipping, spans,
};
use super::super::models::*;
use super::chart::extract_charts;
use super::position::{build_geometry, extract_positions};
use super::reference::extract_reference;
use super::style::{FieldKind, StyleTable, ORIGINAL_INFORMATION_CLASS};
use super::title_line::extract_title_line;

/// A classified paragraph of the message container
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    pub element: ElementRef<'a>,
    pub class: &'a str,
    /// The previous sibling element is the "original information" star
    pub original_information: bool,
}

impl<'a> Paragraph<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        let original_information = element
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .and_then(|prev| prev.value().attr("class"))
            .is_some_and(|class| class.trim().eq_ignore_ascii_case(ORIGINAL_INFORMATION_CLASS));
        Self {
            element,
            class: element.value().attr("class").unwrap_or_default().trim(),
            original_information,
        }
    }
}

/// Accumulator threaded through the paragraph fold
#[derive(Debug, Default)]
pub struct Segmentation {
    /// Sealed messages, in document order
    pub messages: Vec<Message>,
    /// The message currently receiving field paragraphs
    pub current: Option<Message>,
    pub lang: Lang,
}

impl Segmentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the open message, if any
    fn seal(&mut self) {
        if let Some(message) = self.current.take() {
            self.messages.push(message);
        }
    }

    /// Apply one paragraph and return the new state
    pub fn step(mut self, paragraph: &Paragraph<'_>, styles: &StyleTable) -> Self {
        if styles.is_skipped(paragraph.class) {
            return self;
        }

        match styles.classify(paragraph.class) {
            FieldKind::NewEntry => {
                self.seal();
                let message = new_entry(paragraph);
                self.lang = message.lang();
                self.current = Some(message);
            }
            FieldKind::Translation => self.seal(),
            FieldKind::Ignored => debug!(class = paragraph.class, "Ignored field class"),
            FieldKind::Unknown => warn!(class = paragraph.class, "Unrecognized field class"),
            kind => {
                let lang = self.lang;
                match self.current.as_mut() {
                    Some(message) => {
                        apply_field(message, kind, paragraph.element, lang);
                        if kind == FieldKind::Source {
                            self.seal();
                        }
                    }
                    None => warn!(field = ?kind, class = paragraph.class, "Field outside message"),
                }
            }
        }
        self
    }

    /// Seal the last message and return all messages
    pub fn finish(mut self) -> Vec<Message> {
        self.seal();
        self.messages
    }
}

/// Fold the paragraphs into draft messages, one per entry paragraph
pub fn segment(paragraphs: &[Paragraph<'_>], styles: &StyleTable) -> Vec<Message> {
    paragraphs
        .iter()
        .fold(Segmentation::new(), |state, paragraph| state.step(paragraph, styles))
        .finish()
}

fn new_entry(paragraph: &Paragraph<'_>) -> Message {
    let (number, line) = extract_title_line(paragraph.element);
    let mut message = Message {
        number,
        original_information: paragraph.original_information,
        message_type: line.message_type,
        ..Message::default()
    };
    let lang = message.lang();
    message.area = Area::from_segments(lang, &line.area);

    let desc = message.check_create_desc(lang);
    desc.title = line.title;
    desc.vicinity = line.vicinity;
    message
}

fn apply_field(message: &mut Message, kind: FieldKind, el: ElementRef<'_>, lang: Lang) {
    match kind {
        FieldKind::Reference => match extract_reference(el, lang) {
            Ok(reference) => message.references.push(reference),
            Err(err) => warn!(error = %err, "Dropping reference"),
        },
        FieldKind::Time => {
            let time = labelled_text(el, true);
            if !time.is_empty() {
                let desc = message.check_create_desc(lang);
                desc.time = Some(match desc.time.take() {
                    Some(previous) => format!("{previous}\n{time}"),
                    None => time,
                });
            }
        }
        FieldKind::Position => {
            let positions = extract_positions(el);
            if !positions.is_empty() {
                message.positions.extend(positions);
                message.geometry = build_geometry(&message.positions, lang);
            }
        }
        FieldKind::Publication => {
            message.check_create_desc(lang).publication = non_empty(labelled_text(el, false));
        }
        FieldKind::Details => {
            message.check_create_desc(lang).description = non_empty(extract_description(el));
        }
        FieldKind::Note => {
            message.check_create_desc(lang).note = non_empty(labelled_text(el, false));
        }
        FieldKind::Chart => message.charts.extend(extract_charts(el)),
        FieldKind::Source => {
            let source = extract_text(el);
            message.check_create_desc(lang).source = non_empty(remove_brackets(&source).to_string());
        }
        FieldKind::NewEntry | FieldKind::Translation | FieldKind::Ignored | FieldKind::Unknown => {}
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}

/// Paragraph text without the italic field label
fn labelled_text(el: ElementRef<'_>, line_breaks: bool) -> String {
    let label: Vec<_> = field_label(el).into_iter().collect();
    if line_breaks {
        extract_text_preserve_line_break(el, &skipping(&label))
    } else {
        extract_text_with(el, &skipping(&label))
    }
}

/// Raw markup of the details paragraph, without the field label
///
/// When the remaining text sits in exactly one span, that span's content is
/// used instead of the whole paragraph.
fn extract_description(el: ElementRef<'_>) -> String {
    let label: Vec<_> = field_label(el).into_iter().collect();
    let remaining: Vec<_> = spans(el)
        .into_iter()
        .filter(|span| {
            !label
                .iter()
                .any(|l| span.ancestors().any(|a| ElementRef::wrap(a) == Some(*l)) || span == l)
        })
        .collect();
    let target = match remaining.as_slice() {
        [single] => *single,
        _ => el,
    };
    inner_html_with(target, &skipping(&label))
}

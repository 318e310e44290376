//! Text and markup extraction from paragraph elements
//!
//! Word's HTML export scatters a paragraph over nested `span`, `i` and `b`
//! runs. These helpers flatten a paragraph the way the field extractors need
//! it, optionally skipping or replacing selected child elements (the field
//! label, the identifier span, decorative spacer spans).

use once_cell::sync::Lazy;
use scraper::{ElementRef, Node, Selector};

pub(crate) const NON_BREAKING_SPACE: char = '\u{00A0}';

static ITALIC: Lazy<Selector> = Lazy::new(|| Selector::parse("i").unwrap());
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// What to do with a child element while flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeAction {
    Keep,
    Skip,
    Replace(&'static str),
}

fn keep_all(_: ElementRef<'_>) -> NodeAction {
    NodeAction::Keep
}

/// Filter that drops the given elements and their subtrees
pub(crate) fn skipping<'s>(
    skipped: &'s [ElementRef<'s>],
) -> impl Fn(ElementRef<'_>) -> NodeAction + 's {
    move |el| {
        if skipped.iter().any(|s| *s == el) {
            NodeAction::Skip
        } else {
            NodeAction::Keep
        }
    }
}

/// The first italic run of a paragraph, which holds the field label
pub(crate) fn field_label(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.select(&ITALIC).next()
}

pub(crate) fn first_span(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.select(&SPAN).next()
}

/// All `span` descendants, in document order
pub(crate) fn spans(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    el.select(&SPAN).collect()
}

/// Extracts the text of the element and compacts the whitespace
pub(crate) fn extract_text(el: ElementRef<'_>) -> String {
    extract_text_with(el, &keep_all)
}

pub(crate) fn extract_text_with(el: ElementRef<'_>, filter: &dyn Fn(ElementRef<'_>) -> NodeAction) -> String {
    let mut raw = String::new();
    collect_text(el, filter, false, &mut raw);
    compact(&raw)
}

/// Extracts the text of the element and compacts the whitespace, keeping `<br>` line breaks
pub(crate) fn extract_text_preserve_line_break(
    el: ElementRef<'_>,
    filter: &dyn Fn(ElementRef<'_>) -> NodeAction,
) -> String {
    let mut raw = String::new();
    collect_text(el, filter, true, &mut raw);
    raw.split('\n')
        .map(compact)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn compact(raw: &str) -> String {
    raw.replace(NON_BREAKING_SPACE, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text(
    el: ElementRef<'_>,
    filter: &dyn Fn(ElementRef<'_>) -> NodeAction,
    line_breaks: bool,
    out: &mut String,
) {
    for child in el.children() {
        match child.value() {
            // Source line wrapping is not a line break
            Node::Text(text) => out.extend(text.chars().map(|c| match c {
                '\n' | '\r' | '\t' => ' ',
                c => c,
            })),
            Node::Element(element) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                match filter(child_el) {
                    NodeAction::Skip => continue,
                    NodeAction::Replace(text) => {
                        out.push_str(text);
                        continue;
                    }
                    NodeAction::Keep => {}
                }
                if element.name() == "br" {
                    out.push(if line_breaks { '\n' } else { ' ' });
                } else {
                    collect_text(child_el, filter, line_breaks, out);
                }
            }
            _ => {}
        }
    }
}

/// Serializes the children of the element back to markup
pub(crate) fn inner_html_with(el: ElementRef<'_>, filter: &dyn Fn(ElementRef<'_>) -> NodeAction) -> String {
    let mut out = String::new();
    serialize_children(el, filter, &mut out);
    out.trim().to_string()
}

fn serialize_children(el: ElementRef<'_>, filter: &dyn Fn(ElementRef<'_>) -> NodeAction, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape(text, false)),
            Node::Element(element) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                match filter(child_el) {
                    NodeAction::Skip => continue,
                    NodeAction::Replace(text) => {
                        out.push_str(&escape(text, false));
                        continue;
                    }
                    NodeAction::Keep => {}
                }
                out.push('<');
                out.push_str(element.name());
                for (name, value) in element.attrs() {
                    out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.name()) {
                    continue;
                }
                serialize_children(child_el, filter, out);
                out.push_str(&format!("</{}>", element.name()));
            }
            // Word's conditional comments carry no content
            _ => {}
        }
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            NON_BREAKING_SPACE => escaped.push_str("&nbsp;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Removes any trailing period from the line
pub(crate) fn remove_last_period(line: &str) -> &str {
    let line = line.trim();
    line.strip_suffix('.').unwrap_or(line)
}

/// Removes any surrounding brackets
pub(crate) fn remove_brackets(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('(')
        .and_then(|l| l.strip_suffix(')'))
        .unwrap_or(line)
}

//! Chart list extraction
//!
//! `Kort. 101, 102 (INT 1041), 103.`

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::warn;

use super::super::html::{extract_text_with, field_label, remove_last_period, skipping};
use super::super::models::*;
use crate::error::FieldError;

static CHART_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<number>\d+)(?: \(INT (?P<int>\d+)\))?$").unwrap()
});

pub fn parse_chart(item: &str) -> Result<ChartRef, FieldError> {
    let item = item.trim();
    let caps = CHART_PATTERN
        .captures(item)
        .ok_or_else(|| FieldError::Chart(item.to_string()))?;
    Ok(ChartRef {
        chart_number: caps["number"].to_string(),
        international_chart_number: caps.name("int").map(|m| m.as_str().to_string()),
    })
}

/// Parse a comma-separated chart list; unmatched items are logged and skipped
pub fn parse_charts(text: &str) -> Vec<ChartRef> {
    remove_last_period(text)
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .filter_map(|item| match parse_chart(item) {
            Ok(chart) => Some(chart),
            Err(err) => {
                warn!(error = %err, "Skipping chart");
                None
            }
        })
        .collect()
}

pub fn extract_charts(el: ElementRef<'_>) -> Vec<ChartRef> {
    let label: Vec<_> = field_label(el).into_iter().collect();
    parse_charts(&extract_text_with(el, &skipping(&label)))
}

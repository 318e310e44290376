//! Bulletin loading and orchestration
//!
//! This module contains the entry points that run the whole import: decode
//! the bytes, read the header week and year, segment the paragraphs of the
//! message container into messages, merge the translations and stamp every
//! message with the publication date.

use std::path::Path;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::info;

use super::io::{decode_bulletin, validate_html_file};
use super::models::*;
use super::parsing::merge::merge_translations;
use super::parsing::segmenter::{segment, Paragraph};
use super::parsing::week_year::{detect_week_year, publish_timestamp};
use crate::config::ImporterConfig;
use crate::error::ImportError;

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("body div").unwrap());
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Parse the bulletin markup, using `today` when the header cannot be read
///
/// This function:
/// 1. Reads the publication week and year from the header table
/// 2. Classifies every paragraph of the first `div` by its style
/// 3. Folds the paragraphs into Danish and English messages
/// 4. Merges each English message into the Danish one before it
/// 5. Stamps all messages with the Friday of the publication week
pub fn parse_bulletin(html: &str, config: &ImporterConfig, today: NaiveDate) -> Result<Bulletin> {
    let series_id = config.series_id.trim();
    if series_id.is_empty() {
        return Err(ImportError::MissingSeries.into());
    }

    let document = Html::parse_document(html);
    let week_year = detect_week_year(&document, today);

    let container = document
        .select(&CONTAINER)
        .next()
        .ok_or(ImportError::MissingContainer)?;
    let paragraphs: Vec<Paragraph<'_>> = container.select(&PARAGRAPHS).map(Paragraph::new).collect();

    let drafts = segment(&paragraphs, &config.style_table());
    let draft_count = drafts.len();
    let mut messages = merge_translations(drafts);

    let publish_date = publish_timestamp(week_year, config.publish_hour);
    for message in &mut messages {
        message.created_at = publish_date;
        message.publish_date = publish_date;
    }

    info!(
        year = week_year.year,
        week = week_year.week,
        paragraphs = paragraphs.len(),
        drafts = draft_count,
        messages = messages.len(),
        "Extracted NMs"
    );

    Ok(Bulletin {
        year: week_year.year,
        week: week_year.week,
        series_id: series_id.to_string(),
        tag_id: config.tag_id.clone(),
        messages,
    })
}

/// Decode and parse raw bulletin bytes
pub fn parse_bulletin_bytes(bytes: &[u8], config: &ImporterConfig) -> Result<Bulletin> {
    parse_bulletin(&decode_bulletin(bytes), config, Local::now().date_naive())
}

/// Main loading function: validate, read and parse a bulletin file
pub async fn load_bulletin(file_path: &Path, config: &ImporterConfig) -> Result<Bulletin> {
    // Validate file type before attempting to parse
    validate_html_file(file_path)?;

    let bytes = tokio::fs::read(file_path)
        .await
        .map_err(|source| ImportError::Unreadable {
            path: file_path.display().to_string(),
            source,
        })?;
    parse_bulletin_bytes(&bytes, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_blank_series_is_rejected() {
        let config = ImporterConfig {
            series_id: "  ".to_string(),
            ..ImporterConfig::default()
        };
        let err = parse_bulletin("<html><body><div></div></body></html>", &config, today()).unwrap_err();
        assert!(err.to_string().contains("missing message series"));
    }

    #[test]
    fn test_missing_container() {
        let err = parse_bulletin("<html><body><p>Tekst</p></body></html>", &ImporterConfig::default(), today())
            .unwrap_err();
        assert!(err.downcast_ref::<ImportError>().is_some());
    }

    #[test]
    fn test_header_fallback_stamps_current_week() {
        let html = r#"<html><body><div>
            <p class="1nr"><span>14.</span> (T). Kattegat. Bøje udlagt.</p>
        </div></body></html>"#;
        let bulletin = parse_bulletin(html, &ImporterConfig::default(), today()).unwrap();
        assert_eq!((bulletin.year, bulletin.week), (2026, 42));
        assert_eq!(bulletin.messages.len(), 1);
        assert_eq!(
            bulletin.messages[0].publish_date.unwrap().to_string(),
            "2026-10-16 12:00:00"
        );
    }
}

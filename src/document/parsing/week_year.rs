//! Publication week and year detection
//!
//! The bulletin header is a two-row table: the last span of the first row
//! holds the week number, the first span of the second row holds the publish
//! date ending in a four-digit year. Reading it also serves as a litmus test
//! for the document format, but a failure never aborts the import.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, warn};

use super::super::html::extract_text;
use super::super::models::*;
use crate::error::HeaderError;

static HEADER_ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("table tr").unwrap());
static CELL_SPANS: Lazy<Selector> = Lazy::new(|| Selector::parse("td p span").unwrap());

/// Detect the week and year, falling back to the ISO week of `today`
pub fn detect_week_year(document: &Html, today: NaiveDate) -> WeekYear {
    match read_header(document) {
        Ok(week_year) => {
            info!(year = week_year.year, week = week_year.week, "Extracted year and week");
            week_year
        }
        Err(err) => {
            let iso = today.iso_week();
            let fallback = WeekYear {
                year: iso.year(),
                week: iso.week(),
            };
            warn!(
                error = %err,
                year = fallback.year,
                week = fallback.week,
                "Failed extracting week and year, using current week"
            );
            fallback
        }
    }
}

pub(crate) fn read_header(document: &Html) -> Result<WeekYear, HeaderError> {
    let mut rows = document.select(&HEADER_ROWS);

    let week_text = rows
        .next()
        .and_then(|row| row.select(&CELL_SPANS).last())
        .map(extract_text)
        .ok_or(HeaderError::MissingWeek)?;
    let week: u32 = week_text
        .parse()
        .map_err(|_| HeaderError::InvalidWeek(week_text.clone()))?;

    let publish_date = rows
        .next()
        .and_then(|row| row.select(&CELL_SPANS).next())
        .map(extract_text)
        .ok_or(HeaderError::MissingPublishDate)?;
    let year_text = publish_date
        .rsplit(' ')
        .next()
        .unwrap_or_default()
        .trim();
    if year_text.len() != 4 {
        return Err(HeaderError::InvalidYear(publish_date.clone()));
    }
    let year: i32 = year_text
        .parse()
        .map_err(|_| HeaderError::InvalidYear(publish_date.clone()))?;

    if NaiveDate::from_isoywd_opt(year, week, Weekday::Fri).is_none() {
        return Err(HeaderError::NoSuchWeek { year, week });
    }

    Ok(WeekYear { year, week })
}

/// Friday of the ISO week at the given hour
pub fn publish_timestamp(week_year: WeekYear, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_isoywd_opt(week_year.year, week_year.week, Weekday::Fri)?.and_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(week: &str, date: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body>
            <table>
              <tr><td><p><span>Efterretninger for Søfarende</span></p></td>
                  <td><p><span>Uge</span> <span>{week}</span></p></td></tr>
              <tr><td><p><span>{date}</span></p></td></tr>
            </table>
            <div></div>
            </body></html>"#
        ))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_reads_week_and_year() {
        let doc = header("49", "Fredag den 4. december 2015");
        assert_eq!(
            detect_week_year(&doc, today()),
            WeekYear {
                year: 2015,
                week: 49
            }
        );
    }

    #[test]
    fn test_missing_header_falls_back_to_clock() {
        let doc = Html::parse_document("<html><body><div><p>Ingen tabel</p></div></body></html>");
        assert_eq!(read_header(&doc), Err(HeaderError::MissingWeek));
        let week_year = detect_week_year(&doc, today());
        assert_eq!(week_year, WeekYear { year: 2026, week: 42 });
    }

    #[test]
    fn test_non_numeric_week_falls_back() {
        let doc = header("xx", "4. december 2015");
        assert!(matches!(read_header(&doc), Err(HeaderError::InvalidWeek(_))));
        assert_eq!(detect_week_year(&doc, today()).year, 2026);
    }

    #[test]
    fn test_invalid_year_falls_back() {
        let doc = header("49", "4. december 15");
        assert!(matches!(read_header(&doc), Err(HeaderError::InvalidYear(_))));
    }

    #[test]
    fn test_nonexistent_iso_week_falls_back() {
        let doc = header("53", "31. december 2021");
        assert_eq!(
            read_header(&doc),
            Err(HeaderError::NoSuchWeek {
                year: 2021,
                week: 53
            })
        );
    }

    #[test]
    fn test_publish_timestamp_is_friday_noon() {
        let ts = publish_timestamp(WeekYear { year: 2015, week: 49 }, 12).unwrap();
        assert_eq!(ts.to_string(), "2015-12-04 12:00:00");
        assert_eq!(ts.weekday(), Weekday::Fri);
    }
}

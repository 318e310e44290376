//! Position extraction
//!
//! Positions are written one per line as degrees and decimal-comma minutes,
//! e.g. `56 12,5 N 010 15,0 E, Vrag`, optionally enumerated `1) `, `2) `
//! when a message has several.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::ElementRef;
use tracing::warn;

use super::super::html::{extract_text_preserve_line_break, NodeAction};
use super::super::models::*;
use crate::error::FieldError;

static POSITION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<lat_deg>\d+)\s+(?P<lat_min>\d+,?\d+)\s?(?P<lat_hem>[NS])\s+(?P<lon_deg>\d+)\s+(?P<lon_min>\d+,?\d+)\s?(?P<lon_hem>[EW]),?(?P<desc>.*)$",
    )
    .unwrap()
});
static FIRST_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\) ").unwrap());
static LINE_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\d+\) ").unwrap());

/// One half of a position as written in the bulletin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub degrees: u32,
    pub minutes: f64,
    /// One of `N`, `S`, `E`, `W`
    pub hemisphere: char,
}

impl Coordinate {
    fn from_captures(caps: &Captures<'_>, prefix: &str, line: &str) -> Result<Self, FieldError> {
        let degrees = caps[format!("{prefix}_deg").as_str()]
            .parse()
            .map_err(|_| FieldError::Number(line.to_string()))?;
        let minutes = caps[format!("{prefix}_min").as_str()]
            .replace(',', ".")
            .parse()
            .map_err(|_| FieldError::Number(line.to_string()))?;
        let hemisphere = caps[format!("{prefix}_hem").as_str()]
            .chars()
            .next()
            .unwrap_or('N');
        Ok(Self {
            degrees,
            minutes,
            hemisphere,
        })
    }

    /// Signed decimal degrees; south and west are negative
    pub fn decimal(&self) -> f64 {
        let sign = if matches!(self.hemisphere, 'S' | 'W') { -1.0 } else { 1.0 };
        sign * (self.degrees as f64 + self.minutes / 60.0)
    }
}

/// A matched position line before conversion
#[derive(Debug, Clone, PartialEq)]
pub struct PositionLine {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub description: String,
}

impl PositionLine {
    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = line.strip_suffix('.').unwrap_or(line);
        let caps = POSITION_PATTERN
            .captures(line)
            .ok_or_else(|| FieldError::Position(line.to_string()))?;
        Ok(Self {
            latitude: Coordinate::from_captures(&caps, "lat", line)?,
            longitude: Coordinate::from_captures(&caps, "lon", line)?,
            description: caps["desc"].trim().to_string(),
        })
    }

    pub fn to_position(&self) -> Result<Position, FieldError> {
        let latitude = self.latitude.decimal();
        let longitude = self.longitude.decimal();
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(FieldError::PositionRange(format!("{latitude}, {longitude}")));
        }
        Ok(Position {
            latitude,
            longitude,
            description: self.description.clone(),
        })
    }
}

pub fn parse_position_line(line: &str) -> Result<Position, FieldError> {
    PositionLine::parse(line)?.to_position()
}

/// Parse all position lines; lines that fail are logged and dropped
pub fn parse_positions(text: &str) -> Vec<Position> {
    let text = text.replacen("Position. ", "", 1);
    let text = FIRST_INDEX.replace(&text, "");
    let text = LINE_INDEX.replace_all(&text, "\n");

    text.trim()
        .split('\n')
        .filter_map(|line| match parse_position_line(line) {
            Ok(position) => Some(position),
            Err(err) => {
                warn!(error = %err, "Dropping position line");
                None
            }
        })
        .collect()
}

/// Degree and minute signs are rendered as decorated spans; treat them as spaces
fn spacer_filter(el: ElementRef<'_>) -> NodeAction {
    let element = el.value();
    if element.name() != "span" {
        return NodeAction::Keep;
    }
    let style = element.attr("style").unwrap_or_default();
    let class = element.attr("class").unwrap_or_default();
    if style.contains("SpecialD") || class.contains("minut") || class.contains("grad") {
        NodeAction::Replace(" ")
    } else {
        NodeAction::Keep
    }
}

pub fn extract_positions(el: ElementRef<'_>) -> Vec<Position> {
    parse_positions(&extract_text_preserve_line_break(el, &spacer_filter))
}

/// A single feature holding all positions, with descriptions as `name:{index}:{lang}` properties
pub fn build_geometry(positions: &[Position], lang: Lang) -> Option<FeatureCollection> {
    if positions.is_empty() {
        return None;
    }
    let kind = if positions.len() == 1 {
        GeometryKind::Point
    } else {
        GeometryKind::MultiPoint
    };
    let mut properties = BTreeMap::new();
    for (index, position) in positions.iter().enumerate() {
        if !position.description.trim().is_empty() {
            properties.insert(format!("name:{index}:{lang}"), position.description.clone());
        }
    }
    Some(FeatureCollection {
        features: vec![Feature {
            kind,
            coordinates: positions.iter().map(|p| [p.longitude, p.latitude]).collect(),
            properties,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_single_position_line() {
        let pos = parse_position_line("056 12,5 N 010 15,0 E, Wreck").unwrap();
        assert!(approx(pos.latitude, 56.2083));
        assert!(approx(pos.longitude, 10.25));
        assert_eq!(pos.description, "Wreck");
    }

    #[test]
    fn test_southern_and_western_hemispheres_are_negative() {
        let pos = parse_position_line("12 30,0S 045 06,0W.").unwrap();
        assert!(approx(pos.latitude, -12.5));
        assert!(approx(pos.longitude, -45.1));
        assert_eq!(pos.description, "");
    }

    #[test]
    fn test_sign_matches_hemisphere_letter() {
        for (lat_hem, lon_hem) in [("N", "E"), ("N", "W"), ("S", "E"), ("S", "W")] {
            let line = format!("55 00,0 {lat_hem} 011 00,0 {lon_hem}");
            let pos = parse_position_line(&line).unwrap();
            assert_eq!(pos.latitude < 0.0, lat_hem == "S");
            assert_eq!(pos.longitude < 0.0, lon_hem == "W");
            assert!((-90.0..=90.0).contains(&pos.latitude));
            assert!((-180.0..=180.0).contains(&pos.longitude));
        }
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(matches!(
            parse_position_line("95 00,0 N 010 00,0 E"),
            Err(FieldError::PositionRange(_))
        ));
        assert!(matches!(
            parse_position_line("55 00,0 N 190 00,0 E"),
            Err(FieldError::PositionRange(_))
        ));
    }

    #[test]
    fn test_mismatch() {
        assert!(matches!(
            parse_position_line("Se kort"),
            Err(FieldError::Position(_))
        ));
        // Minutes need at least two digits
        assert!(parse_position_line("55 5 N 010 15,0 E").is_err());
    }

    #[test]
    fn test_enumerated_lines_and_bad_line_is_dropped() {
        let text = "Position. 1) 55 40,3 N 012 36,5 E, Bøje A.\n2) ukendt\n3) 55 41,0 N 012 37,0 E, Bøje B.";
        let positions = parse_positions(text);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].description, "Bøje A");
        assert_eq!(positions[1].description, "Bøje B");
    }

    #[test]
    fn test_extract_from_markup_with_degree_spans() {
        let doc = Html::parse_fragment(
            r#"<p class="position"><i>Position. </i>55<span class="grad">°</span>40,3<span class="minut">'</span>N 012<span style="font-family:SpecialD">°</span>36,5' E.</p>"#,
        );
        let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
        let positions = extract_positions(p);
        // The trailing minute sign on the longitude is not a spacer span
        assert!(positions.is_empty());

        let doc = Html::parse_fragment(
            r#"<p class="position">Position. 55<span class="grad">°</span>40,3<span class="minut">'</span>N 012<span class="grad">°</span>36,5<span class="minut">'</span>E, Vrag.</p>"#,
        );
        let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
        let positions = extract_positions(p);
        assert_eq!(positions.len(), 1);
        assert!(approx(positions[0].latitude, 55.0 + 40.3 / 60.0));
        assert_eq!(positions[0].description, "Vrag");
    }

    #[test]
    fn test_geometry_properties() {
        let positions = parse_positions("55 40,3 N 012 36,5 E, A\n55 41,0 N 012 37,0 E");
        let geometry = build_geometry(&positions, Lang::Da).unwrap();
        assert_eq!(geometry.features.len(), 1);
        let feature = &geometry.features[0];
        assert_eq!(feature.kind, GeometryKind::MultiPoint);
        assert_eq!(feature.coordinates.len(), 2);
        assert_eq!(feature.properties.get("name:0:da").map(String::as_str), Some("A"));
        assert!(!feature.properties.contains_key("name:1:da"));
        assert!(build_geometry(&[], Lang::Da).is_none());
    }
}

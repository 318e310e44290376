//! Core data structures for bulletin representation
//!
//! This module defines all the public types used to represent a parsed
//! bulletin: messages, their language-tagged texts, positions, references
//! and charts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Language of a text variant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Da,
    En,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Da => write!(f, "da"),
            Lang::En => write!(f, "en"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Temporary,
    Preliminary,
    #[default]
    Permanent,
}

/// Publication week and year read from the bulletin header
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekYear {
    pub year: i32,
    pub week: u32,
}

/// A parsed bulletin: header timestamp plus the merged messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bulletin {
    pub year: i32,
    pub week: u32,
    pub series_id: String,
    pub tag_id: Option<String>,
    pub messages: Vec<Message>,
}

/// One bulletin entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Series identifier, only present on the Danish primary record
    pub number: Option<u32>,
    pub original_information: bool,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub area: Option<Area>,
    pub descs: Vec<MessageDesc>,
    pub positions: Vec<Position>,
    pub geometry: Option<FeatureCollection>,
    pub charts: Vec<ChartRef>,
    pub references: Vec<Reference>,
    pub created_at: Option<NaiveDateTime>,
    pub publish_date: Option<NaiveDateTime>,
}

/// Language-specific texts of a message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageDesc {
    pub lang: Lang,
    pub title: String,
    pub vicinity: Option<String>,
    pub time: Option<String>,
    pub publication: Option<String>,
    /// Raw markup of the details paragraph
    pub description: Option<String>,
    pub note: Option<String>,
    pub source: Option<String>,
}

impl MessageDesc {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            ..Default::default()
        }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desc(&self, lang: Lang) -> Option<&MessageDesc> {
        self.descs.iter().find(|d| d.lang == lang)
    }

    /// Get the description for `lang`, creating it if missing
    pub fn check_create_desc(&mut self, lang: Lang) -> &mut MessageDesc {
        let index = match self.descs.iter().position(|d| d.lang == lang) {
            Some(index) => index,
            None => {
                self.descs.push(MessageDesc::new(lang));
                self.descs.len() - 1
            }
        };
        &mut self.descs[index]
    }

    /// Languages that have contributed text to this message
    pub fn language_variants(&self) -> BTreeSet<Lang> {
        self.descs.iter().map(|d| d.lang).collect()
    }

    /// Language of the record itself: Danish primaries carry a number
    pub fn lang(&self) -> Lang {
        if self.number.is_some() { Lang::Da } else { Lang::En }
    }

    pub fn title(&self) -> Option<&str> {
        self.descs.first().map(|d| d.title.as_str())
    }

    /// Hyphen-joined area path in the given language
    pub fn area_name(&self, lang: Lang) -> Option<String> {
        self.area.as_ref().and_then(|a| a.path(lang))
    }
}

/// A named area, optionally nested under a parent area
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub names: Vec<LocalizedName>,
    pub parent: Option<Box<Area>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalizedName {
    pub lang: Lang,
    pub name: String,
}

impl Area {
    pub fn named(lang: Lang, name: impl Into<String>) -> Self {
        Self {
            names: vec![LocalizedName {
                lang,
                name: name.into(),
            }],
            parent: None,
        }
    }

    /// Build a hierarchy from outermost to innermost segment
    pub fn from_segments(lang: Lang, segments: &[String]) -> Option<Self> {
        segments.iter().fold(None, |parent, segment| {
            let mut area = Area::named(lang, segment.as_str());
            area.parent = parent.map(Box::new);
            Some(area)
        })
    }

    pub fn name(&self, lang: Lang) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.lang == lang)
            .map(|n| n.name.as_str())
    }

    /// Number of levels including this one
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }

    pub fn path(&self, lang: Lang) -> Option<String> {
        let own = self.name(lang)?.to_string();
        match self.parent.as_ref().and_then(|p| p.path(lang)) {
            Some(parent) => Some(format!("{parent} - {own}")),
            None => Some(own),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferenceType {
    Repetition,
    Update,
    Cancellation,
    Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
    /// Formatted as `NM-{id:03}-{yy:02}`
    pub target_message_id: String,
    pub description: Option<String>,
    pub lang: Lang,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartRef {
    pub chart_number: String,
    pub international_chart_number: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    pub kind: GeometryKind,
    /// `[longitude, latitude]` pairs
    pub coordinates: Vec<[f64; 2]>,
    pub properties: BTreeMap<String, String>,
}

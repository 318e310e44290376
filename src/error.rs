//! Error types for bulletin import
//!
//! Header and field errors never abort an import: the former are replaced by
//! a clock fallback, the latter are logged and the field is dropped.

use thiserror::Error;

/// Failures reading the publication week and year from the header table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("no week number found in the HTML")]
    MissingWeek,
    #[error("no publish date found in the HTML")]
    MissingPublishDate,
    #[error("invalid week number '{0}'")]
    InvalidWeek(String),
    #[error("invalid publish year in '{0}'")]
    InvalidYear(String),
    #[error("week {week} does not exist in {year}")]
    NoSuchWeek { year: i32, week: u32 },
}

/// A single field paragraph that did not match its grammar
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("error matching position pattern: {0}")]
    Position(String),
    #[error("position out of range: {0}")]
    PositionRange(String),
    #[error("unknown reference format {0}")]
    Reference(String),
    #[error("unknown chart format {0}")]
    Chart(String),
    #[error("invalid number '{0}'")]
    Number(String),
}

/// File-level import failures
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(
        "Invalid file format. Expected .html or .htm file, got .{0}\n\
        Note: ntmx only supports HTML exports of the EfS Word bulletin"
    )]
    UnsupportedExtension(String),
    #[error("could not read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("no message container <div> found in the document body")]
    MissingContainer,
    #[error("missing message series for imported NMs")]
    MissingSeries,
}

/// Why an English translation could not be folded into its Danish message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("no preceding Danish message")]
    NoDanishMessage,
    #[error("expected one language variant on each message, found {danish} and {english}")]
    LanguageVariants { danish: usize, english: usize },
    #[error("area hierarchies differ in depth ({danish} vs {english})")]
    AreaDepth { danish: usize, english: usize },
    #[error("geometries differ in feature count ({danish} vs {english})")]
    FeatureCount { danish: usize, english: usize },
}

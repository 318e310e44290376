//! Bulletin parsing components
//!
//! Field extractors for single paragraphs (title line, position, reference,
//! chart), the header week/year detector, the style-class dispatch table,
//! and the two passes that turn the paragraph sequence into messages.

pub mod chart;
pub mod merge;
pub mod position;
pub mod reference;
pub mod segmenter;
pub mod style;
pub mod title_line;
pub mod week_year;

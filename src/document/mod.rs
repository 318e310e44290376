//! Bulletin parsing and data structures module
//!
//! This module provides functionality for parsing the HTML export of the
//! weekly EfS Word bulletin and converting it into structured messages.

pub(crate) mod html;
pub(crate) mod io;
pub mod loader;
pub mod models;
pub mod parsing;

// Re-export all models and the loading entry points
pub use loader::{load_bulletin, parse_bulletin, parse_bulletin_bytes};
pub use models::*;
pub use parsing::style::{FieldKind, StyleTable};
pub use parsing::week_year::{detect_week_year, publish_timestamp};

//! ntmx: importer for legacy Danish Notice-to-Mariners bulletins
//!
//! This library reads the HTML export of the weekly "Efterretninger for
//! Søfarende" (EfS) Word bulletin and turns it into bilingual structured
//! messages with positions, charts and references.

pub mod config;
pub mod document;
pub mod error;
pub mod export;

/// Export format options
#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
    Markdown,
}

// Re-export commonly used types
pub use config::ImporterConfig;
pub use document::{Bulletin, Message, load_bulletin, parse_bulletin};
pub use export::export_bulletin;

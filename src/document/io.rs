//! File I/O operations and validation
//!
//! This module handles file validation and decoding of the legacy
//! single-byte bulletin encoding.

use std::path::Path;

use anyhow::Result;
use encoding_rs::WINDOWS_1252;

use crate::error::ImportError;

/// Validates that the file looks like an HTML export
pub(crate) fn validate_html_file(file_path: &Path) -> Result<()> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("html") && !extension.eq_ignore_ascii_case("htm") {
        return Err(ImportError::UnsupportedExtension(extension.to_string()).into());
    }

    Ok(())
}

/// Decode the bulletin bytes
///
/// Word saves the bulletin as ISO-8859-1, which Windows-1252 extends. A byte
/// order mark takes precedence.
pub(crate) fn decode_bulletin(bytes: &[u8]) -> String {
    let (text, _encoding, _had_errors) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

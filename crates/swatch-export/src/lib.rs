//! Output formats for resolved themes.
//!
//! Supported formats:
//! - JSON (resolved trees with a metadata envelope)
//! - CSS (custom properties, one block per theme)

#[cfg(feature = "css")]
pub mod css;

#[cfg(feature = "json")]
pub mod json;

use chrono::{DateTime, Utc};
use std::path::Path;
use swatch_core::ExportError;
use swatch_resolver::ResolvedTheme;

#[cfg(feature = "css")]
pub use css::CssOptions;
#[cfg(feature = "json")]
pub use json::{JsonOptions, Meta, ResolvedDocument};

/// Export resolved themes to a pretty-printed JSON document.
#[cfg(feature = "json")]
pub fn export_json(
    themes: &[ResolvedTheme],
    options: &JsonOptions,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    json::export(themes, options, generated_at)
}

/// Export resolved themes to a CSS custom-property stylesheet.
#[cfg(feature = "css")]
pub fn export_css(themes: &[ResolvedTheme], options: &CssOptions, generated_at: DateTime<Utc>) -> String {
    css::export(themes, options, generated_at)
}

/// Timestamp format shared by both artifacts, e.g. `2025-01-31T09:15:02.123456Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Write a generated artifact, truncating any previous contents.
pub fn write_artifact(path: &Path, contents: &str, artifact: &'static str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Write {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

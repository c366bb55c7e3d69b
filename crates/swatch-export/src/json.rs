//! Resolved JSON export.

use crate::format_timestamp;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use swatch_core::{ExportError, TokenTree};
use swatch_resolver::ResolvedTheme;
use tracing::warn;

/// Key reserved for the metadata envelope.
pub const META_KEY: &str = "meta";

/// Metadata written alongside the resolved themes.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    pub version: String,
    pub description: String,
    /// Input file names recorded as provenance.
    pub generated_from: Vec<String>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            description: "Sentinel design system color mappings with resolved hex values".to_string(),
            generated_from: vec![
                "base-styles.json".to_string(),
                "sentinel-ds-colors-mapped.json".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub version: String,
    pub description: String,
    pub generated_from: Vec<String>,
    pub generated_at: String,
}

/// The resolved document: `meta` followed by one key per theme.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDocument<'a> {
    pub meta: Meta,
    #[serde(flatten)]
    pub themes: IndexMap<&'a str, &'a TokenTree>,
}

/// Wrap resolved themes in the metadata envelope.
pub fn build_document<'a>(
    themes: &'a [ResolvedTheme],
    options: &JsonOptions,
    generated_at: DateTime<Utc>,
) -> ResolvedDocument<'a> {
    let mut trees = IndexMap::with_capacity(themes.len());
    for theme in themes {
        if theme.name == META_KEY {
            warn!("theme named `{META_KEY}` collides with the metadata envelope; skipping it in JSON output");
            continue;
        }
        trees.insert(theme.name.as_str(), &theme.tree);
    }
    ResolvedDocument {
        meta: Meta {
            version: options.version.clone(),
            description: options.description.clone(),
            generated_from: options.generated_from.clone(),
            generated_at: format_timestamp(generated_at),
        },
        themes: trees,
    }
}

/// Serialize resolved themes with 2-space indentation.
pub fn export(
    themes: &[ResolvedTheme],
    options: &JsonOptions,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let document = build_document(themes, options, generated_at);
    let mut out = serde_json::to_string_pretty(&document)?;
    out.push('\n');
    Ok(out)
}

//! Error types for swatch.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for swatch.
#[derive(Debug, Error)]
pub enum SwatchError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors while reading an input document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document shape in {}: {reason}", .path.display())]
    InvalidShape { path: PathBuf, reason: String },
}

/// Errors while building the palette lookup table in strict mode.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Invalid color at colors.{path}: {value:?} is not a #RRGGBB or #RRGGBBAA literal")]
    InvalidColor { path: String, value: String },

    #[error("Lookup key '{key}' is claimed by both colors.{first} and colors.{second}")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },
}

/// Errors while writing generated artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {artifact} to {}: {source}", .path.display())]
    Write {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

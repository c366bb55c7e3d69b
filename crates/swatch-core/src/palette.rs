//! The palette and its flattened lookup table.
//!
//! Every palette leaf is registered under three spellings of its path:
//! dotted (`gray-true.50`), dashed (`gray-true-50`), and lowercased dashed.
//! Lookups are exact; callers normalize case by trying several spellings.

use crate::errors::{LoadError, PaletteError};
use crate::tree::{read_json_document, TokenNode, TokenTree};
use crate::types::{is_hex_literal, TokenPath, HEX_PREFIX};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// The raw hex palette (the `colors` tree of the palette document).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    pub colors: TokenTree,
}

impl Palette {
    pub fn new(colors: TokenTree) -> Self {
        Self { colors }
    }

    /// Load a palette document from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let root: Value = read_json_document(path)?;
        Self::from_value(root).map_err(|reason| LoadError::InvalidShape {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Build from a parsed palette document. A missing `colors` key gives an empty palette.
    pub fn from_value(root: Value) -> Result<Self, String> {
        let Value::Object(mut root) = root else {
            return Err("expected a JSON object with a top-level `colors` key".to_string());
        };
        match root.remove("colors") {
            None => {
                warn!("palette document has no `colors` key; every reference will be unresolved");
                Ok(Self::default())
            }
            Some(colors @ Value::Object(_)) => {
                let colors = serde_json::from_value(colors).map_err(|e| e.to_string())?;
                Ok(Self { colors })
            }
            Some(_) => Err("`colors` must be a JSON object".to_string()),
        }
    }
}

/// Options for building a lookup table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteOptions {
    /// Reject malformed hex leaves and keys claimed by two palette paths.
    pub strict: bool,
}

impl PaletteOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// A registered palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    pub value: String,
    /// Dotted palette path the value came from.
    pub source: String,
}

/// Two palette paths that normalized to the same lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    /// Path whose value was overwritten.
    pub first: String,
    /// Path whose value won.
    pub second: String,
}

/// Flat lookup from normalized key to hex value.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: IndexMap<String, LookupEntry>,
    collisions: Vec<KeyCollision>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a palette into a lookup table.
    pub fn from_palette(palette: &Palette, options: &PaletteOptions) -> Result<Self, PaletteError> {
        let mut table = Self::new();
        table.register_tree(&palette.colors, &TokenPath::new(), options)?;
        Ok(table)
    }

    fn register_tree(
        &mut self,
        tree: &TokenTree,
        prefix: &TokenPath,
        options: &PaletteOptions,
    ) -> Result<(), PaletteError> {
        for (key, node) in tree {
            let path = prefix.child(key);
            match node {
                TokenNode::Group(children) => self.register_tree(children, &path, options)?,
                TokenNode::Value(Value::String(value)) if value.starts_with(HEX_PREFIX) => {
                    if !is_hex_literal(value) {
                        if options.strict {
                            return Err(PaletteError::InvalidColor {
                                path: path.dotted(),
                                value: value.clone(),
                            });
                        }
                        debug!(path = %path, value = %value, "registering malformed hex literal");
                    }
                    self.register_leaf(&path, value, options)?;
                }
                TokenNode::Value(other) => {
                    debug!(path = %path, value = %other, "skipping non-color palette leaf");
                }
            }
        }
        Ok(())
    }

    fn register_leaf(
        &mut self,
        path: &TokenPath,
        value: &str,
        options: &PaletteOptions,
    ) -> Result<(), PaletteError> {
        let source = path.dotted();
        let dashed = path.dashed();
        let lowered = dashed.to_lowercase();
        for key in [source.clone(), dashed, lowered] {
            if let Some(collision) = self.insert(key, value, &source) {
                if options.strict {
                    return Err(PaletteError::KeyCollision {
                        key: collision.key,
                        first: collision.first,
                        second: collision.second,
                    });
                }
            }
        }
        Ok(())
    }

    /// Insert a key. Last write wins; returns the collision if another path owned the key.
    pub fn insert(&mut self, key: String, value: &str, source: &str) -> Option<KeyCollision> {
        let entry = LookupEntry {
            value: value.to_string(),
            source: source.to_string(),
        };
        let previous = self.entries.insert(key.clone(), entry)?;
        if previous.source == source {
            return None;
        }
        let collision = KeyCollision {
            key,
            first: previous.source,
            second: source.to_string(),
        };
        self.collisions.push(collision.clone());
        Some(collision)
    }

    /// Get a value by exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.value.as_str())
    }

    /// Get the full entry for a key.
    pub fn entry(&self, key: &str) -> Option<&LookupEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LookupEntry)> {
        self.entries.iter()
    }

    /// Number of keys (not palette leaves).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that two different palette paths both claimed, in registration order.
    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }
}

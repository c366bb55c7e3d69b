//! Token trees: the ordered, arbitrarily nested documents swatch reads and writes.

use crate::errors::LoadError;
use crate::types::TokenPath;
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// An ordered map of token names to nodes.
pub type TokenTree = IndexMap<String, TokenNode>;

/// A node in a token tree.
///
/// JSON objects deserialize as groups; every other JSON value is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Group(TokenTree),
    Value(Value),
}

impl TokenNode {
    /// Shorthand for a string leaf.
    pub fn string(value: impl Into<String>) -> Self {
        TokenNode::Value(Value::String(value.into()))
    }

    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            TokenNode::Group(tree) => Some(tree),
            TokenNode::Value(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenNode::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Collect every leaf with its full key path, depth-first in key order.
pub fn leaves(tree: &TokenTree) -> Vec<(TokenPath, &Value)> {
    let mut out = Vec::new();
    collect_leaves(tree, &TokenPath::new(), &mut out);
    out
}

fn collect_leaves<'a>(tree: &'a TokenTree, prefix: &TokenPath, out: &mut Vec<(TokenPath, &'a Value)>) {
    for (key, node) in tree {
        let path = prefix.child(key);
        match node {
            TokenNode::Group(children) => collect_leaves(children, &path, out),
            TokenNode::Value(value) => out.push((path, value)),
        }
    }
}

/// Number of leaves in a tree.
pub fn leaf_count(tree: &TokenTree) -> usize {
    tree.values()
        .map(|node| match node {
            TokenNode::Group(children) => leaf_count(children),
            TokenNode::Value(_) => 1,
        })
        .sum()
}

/// Read and parse a JSON document from disk.
pub fn read_json_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// The theme mapping document: one token tree per theme, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeMapping {
    pub themes: IndexMap<String, TokenNode>,
}

impl ThemeMapping {
    /// Load a theme mapping document from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let root: Value = read_json_document(path)?;
        Self::from_value(root).map_err(|reason| LoadError::InvalidShape {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Build from an already-parsed JSON value. The root must be an object.
    pub fn from_value(root: Value) -> Result<Self, String> {
        if !root.is_object() {
            return Err("expected a JSON object keyed by theme name".to_string());
        }
        let themes = serde_json::from_value(root).map_err(|e| e.to_string())?;
        Ok(Self { themes })
    }

    /// Theme name and tree for every top-level group, skipping scalar entries.
    pub fn theme_trees(&self) -> impl Iterator<Item = (&str, &TokenTree)> {
        self.themes
            .iter()
            .filter_map(|(name, node)| node.as_group().map(|tree| (name.as_str(), tree)))
    }
}

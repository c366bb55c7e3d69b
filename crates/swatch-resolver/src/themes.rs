//! Theme tree resolution.
//!
//! Rebuilds each theme tree with every string leaf passed through the
//! [`ReferenceResolver`]. Key order and nesting are preserved exactly, since
//! they become the CSS property names downstream.

use crate::references::{ReferenceResolver, UnresolvedReference};
use serde_json::Value;
use swatch_core::{ThemeMapping, TokenNode, TokenPath, TokenTree};

/// An unresolved reference and the leaf it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedLeaf {
    pub path: TokenPath,
    pub reference: UnresolvedReference,
}

/// A theme with all references resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub name: String,
    pub tree: TokenTree,
    pub unresolved: Vec<UnresolvedLeaf>,
}

/// Resolve every theme in a mapping document, in document order.
pub fn resolve_themes(mapping: &ThemeMapping, resolver: &ReferenceResolver<'_>) -> Vec<ResolvedTheme> {
    mapping
        .theme_trees()
        .map(|(name, tree)| resolve_theme(name, tree, resolver))
        .collect()
}

/// Resolve a single theme tree.
pub fn resolve_theme(name: &str, tree: &TokenTree, resolver: &ReferenceResolver<'_>) -> ResolvedTheme {
    let mut walker = TreeResolver {
        resolver,
        unresolved: Vec::new(),
    };
    let tree = walker.resolve_tree(tree, &TokenPath::new());
    ResolvedTheme {
        name: name.to_string(),
        tree,
        unresolved: walker.unresolved,
    }
}

struct TreeResolver<'r, 'a> {
    resolver: &'r ReferenceResolver<'a>,
    unresolved: Vec<UnresolvedLeaf>,
}

impl TreeResolver<'_, '_> {
    fn resolve_tree(&mut self, tree: &TokenTree, prefix: &TokenPath) -> TokenTree {
        tree.iter()
            .map(|(key, node)| {
                let path = prefix.child(key);
                (key.clone(), self.resolve_node(node, &path))
            })
            .collect()
    }

    fn resolve_node(&mut self, node: &TokenNode, path: &TokenPath) -> TokenNode {
        match node {
            TokenNode::Group(children) => TokenNode::Group(self.resolve_tree(children, path)),
            TokenNode::Value(Value::String(value)) => {
                let resolution = self.resolver.resolve(value);
                if let Some(reference) = resolution.warning {
                    self.unresolved.push(UnresolvedLeaf {
                        path: path.clone(),
                        reference,
                    });
                }
                TokenNode::string(resolution.value)
            }
            // Numbers, booleans, arrays and nulls are not color references.
            TokenNode::Value(other) => TokenNode::Value(other.clone()),
        }
    }
}

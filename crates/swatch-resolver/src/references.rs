//! Reference resolution.
//!
//! Resolves symbolic references (`$Colors-Gray-True-50`) to palette hex values.
//! A reference is cleaned (sigil, namespace prefix, and parentheses removed),
//! checked against the alias table, and then looked up under each spelling in
//! [`KEY_STRATEGIES`] until one hits.

use std::fmt;
use swatch_core::{is_hex_literal, LookupTable};
use tracing::debug;

/// A fixed redirect for a reference spelling that does not follow the palette layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    /// Cleaned, lowercased reference spelling.
    pub name: &'static str,
    /// Lookup table key the alias points at.
    pub target: &'static str,
    /// Literal used when the target is missing from the palette.
    pub fallback: Option<&'static str>,
}

const fn alias(name: &'static str, target: &'static str) -> Alias {
    Alias {
        name,
        target,
        fallback: None,
    }
}

/// Irregular spellings used by the theme mapping documents.
pub const ALIASES: &[Alias] = &[
    alias("base-white", "base.white"),
    alias("base-black", "base.black"),
    alias("brand-border", "brand.border"),
    alias("brand-ice-200", "brand.ice-200"),
    alias("brand-app-background-smoke-50", "brand.app-background-smoke-50"),
    alias("brand-app-background-(smoke-50)", "brand.app-background-smoke-50"),
    alias("storm-100", "storm.100"),
    alias("storm-200", "storm.200"),
    alias("smoke-750", "smoke.750"),
    alias("gray-true-50", "gray-true.50"),
    Alias {
        name: "border-default",
        target: "storm-100",
        fallback: Some("#DDE6F1FF"),
    },
];

/// One way of spelling a cleaned reference as a lookup key.
#[derive(Clone, Copy)]
pub struct KeyStrategy {
    pub name: &'static str,
    pub build: fn(&str) -> String,
}

fn lowercase(key: &str) -> String {
    key.to_lowercase()
}

fn lowercase_dotted(key: &str) -> String {
    key.to_lowercase().replace('-', ".")
}

fn verbatim(key: &str) -> String {
    key.to_string()
}

fn dotted(key: &str) -> String {
    key.replace('-', ".")
}

/// Lookup spellings, tried in order. Append new conventions at the end.
pub const KEY_STRATEGIES: &[KeyStrategy] = &[
    KeyStrategy { name: "lowercase", build: lowercase },
    KeyStrategy { name: "lowercase-dotted", build: lowercase_dotted },
    KeyStrategy { name: "verbatim", build: verbatim },
    KeyStrategy { name: "dotted", build: dotted },
];

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Leading character that marks a symbolic reference.
    pub sigil: char,
    /// Namespace prefix stripped from references, matched case-insensitively.
    pub namespace: Option<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            sigil: '$',
            namespace: Some("Colors-".to_string()),
        }
    }
}

/// How a value was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// Already a hex literal.
    Literal,
    /// Not a reference; passed through as-is.
    PassThrough,
    /// Redirected by an alias.
    Alias(&'static str),
    /// An alias target was missing and its fallback literal was used.
    Fallback(&'static str),
    /// Found under the named key strategy.
    Strategy(&'static str),
    /// No spelling matched.
    Unresolved,
}

/// A reference that matched nothing in the lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// The reference exactly as written.
    pub reference: String,
    /// Lookup keys that were tried, in order.
    pub tried: Vec<String>,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not resolve variable: {}", self.reference)
    }
}

/// The outcome of resolving one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub via: ResolvedVia,
    pub warning: Option<UnresolvedReference>,
}

impl Resolution {
    fn resolved(value: impl Into<String>, via: ResolvedVia) -> Self {
        Self {
            value: value.into(),
            via,
            warning: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.warning.is_none()
    }
}

/// Resolves scalar values against a palette lookup table.
#[derive(Debug, Clone)]
pub struct ReferenceResolver<'a> {
    table: &'a LookupTable,
    options: ResolverOptions,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(table: &'a LookupTable) -> Self {
        Self::with_options(table, ResolverOptions::default())
    }

    pub fn with_options(table: &'a LookupTable, options: ResolverOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &LookupTable {
        self.table
    }

    /// Check whether a string is a symbolic reference.
    pub fn is_reference(&self, value: &str) -> bool {
        value.starts_with(self.options.sigil)
    }

    /// Resolve a string value.
    ///
    /// Hex literals and non-reference strings come back unchanged. A reference
    /// that cannot be found comes back verbatim with a warning attached.
    pub fn resolve(&self, value: &str) -> Resolution {
        if is_hex_literal(value) {
            return Resolution::resolved(value, ResolvedVia::Literal);
        }
        if !self.is_reference(value) {
            return Resolution::resolved(value, ResolvedVia::PassThrough);
        }

        let key = self.strip_namespace(&value[self.options.sigil.len_utf8()..]);

        if let Some(resolution) = self.resolve_alias(key) {
            debug!(reference = value, resolved = %resolution.value, via = ?resolution.via, "resolved alias");
            return resolution;
        }

        let key = key.replace(['(', ')'], "");
        let mut tried = Vec::with_capacity(KEY_STRATEGIES.len());
        for strategy in KEY_STRATEGIES {
            let candidate = (strategy.build)(&key);
            if let Some(hex) = self.table.get(&candidate) {
                debug!(reference = value, key = %candidate, strategy = strategy.name, "resolved reference");
                return Resolution::resolved(hex, ResolvedVia::Strategy(strategy.name));
            }
            if !tried.contains(&candidate) {
                tried.push(candidate);
            }
        }

        Resolution {
            value: value.to_string(),
            via: ResolvedVia::Unresolved,
            warning: Some(UnresolvedReference {
                reference: value.to_string(),
                tried,
            }),
        }
    }

    fn strip_namespace<'k>(&self, key: &'k str) -> &'k str {
        let Some(namespace) = self.options.namespace.as_deref() else {
            return key;
        };
        match key.get(..namespace.len()) {
            Some(head) if head.eq_ignore_ascii_case(namespace) => &key[namespace.len()..],
            _ => key,
        }
    }

    fn resolve_alias(&self, key: &str) -> Option<Resolution> {
        let lowered = key.to_lowercase();
        let unwrapped = lowered.replace(['(', ')'], "");
        let alias = ALIASES
            .iter()
            .find(|a| a.name == lowered)
            .or_else(|| ALIASES.iter().find(|a| a.name == unwrapped))?;

        if let Some(hex) = self.table.get(alias.target) {
            return Some(Resolution::resolved(hex, ResolvedVia::Alias(alias.name)));
        }
        alias
            .fallback
            .map(|hex| Resolution::resolved(hex, ResolvedVia::Fallback(alias.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_core::{LookupTable, Palette, PaletteOptions};

    fn table(colors: serde_json::Value) -> LookupTable {
        let palette = Palette::from_value(serde_json::json!({ "colors": colors })).unwrap();
        LookupTable::from_palette(&palette, &PaletteOptions::default()).unwrap()
    }

    fn sample_table() -> LookupTable {
        table(serde_json::json!({
            "base": { "white": "#FFFFFFFF", "black": "#000000FF" },
            "gray-true": { "50": "#FAFAFAFF", "500": "#737373FF" },
            "storm": { "100": "#DDE6F1FF", "200": "#C4D2E4FF" },
            "brand": { "app-background-smoke-50": "#F7F8FAFF", "ice-200": "#D6E9F8FF" }
        }))
    }

    #[test]
    fn test_literal_is_identity() {
        let table = sample_table();
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("#12345678");
        assert_eq!(r.value, "#12345678");
        assert_eq!(r.via, ResolvedVia::Literal);
        assert!(r.is_resolved());
    }

    #[test]
    fn test_resolves_namespaced_mixed_case_reference() {
        let table = sample_table();
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("$Colors-Gray-True-500");
        assert_eq!(r.value, "#737373FF");
        assert_eq!(r.via, ResolvedVia::Strategy("lowercase"));
    }

    #[test]
    fn test_dotted_fallback_spelling() {
        let table = table(serde_json::json!({ "text": { "muted": "#999999FF" } }));
        // Hand-built table without the dashed spelling.
        let mut custom = LookupTable::new();
        custom.insert("text.muted".to_string(), "#999999FF", "text.muted");
        let resolver = ReferenceResolver::new(&custom);
        let r = resolver.resolve("$Colors-Text-Muted");
        assert_eq!(r.value, "#999999FF");
        assert_eq!(r.via, ResolvedVia::Strategy("lowercase-dotted"));

        // The flattened palette also carries the dashed key, which wins first.
        let resolver = ReferenceResolver::new(&table);
        assert_eq!(resolver.resolve("$Colors-Text-Muted").via, ResolvedVia::Strategy("lowercase"));
    }

    #[test]
    fn test_original_case_spelling() {
        let mut custom = LookupTable::new();
        custom.insert("Accent.Teal".to_string(), "#14B8A6FF", "Accent.Teal");
        let resolver = ReferenceResolver::new(&custom);
        let r = resolver.resolve("$Accent-Teal");
        assert_eq!(r.value, "#14B8A6FF");
        assert_eq!(r.via, ResolvedVia::Strategy("dotted"));
    }

    #[test]
    fn test_parentheses_are_dropped() {
        let table = table(serde_json::json!({ "smoke": { "50": "#F7F8FAFF" } }));
        let resolver = ReferenceResolver::new(&table);
        assert_eq!(resolver.resolve("$Colors-(Smoke-50)").value, "#F7F8FAFF");
    }

    #[test]
    fn test_border_default_alias() {
        let table = sample_table();
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("$border-default");
        assert_eq!(r.value, "#DDE6F1FF");
        assert_eq!(r.via, ResolvedVia::Alias("border-default"));
    }

    #[test]
    fn test_border_default_fallback_without_storm() {
        let table = table(serde_json::json!({ "base": { "white": "#FFFFFFFF" } }));
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("$Colors-Border-Default");
        assert_eq!(r.value, "#DDE6F1FF");
        assert_eq!(r.via, ResolvedVia::Fallback("border-default"));
    }

    #[test]
    fn test_parenthesized_alias_spelling() {
        let table = sample_table();
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("$Colors-Brand-App-Background-(Smoke-50)");
        assert_eq!(r.value, "#F7F8FAFF");
        assert_eq!(r.via, ResolvedVia::Alias("brand-app-background-(smoke-50)"));
    }

    #[test]
    fn test_unresolved_keeps_reference_and_warns() {
        let table = sample_table();
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("$Colors-Ghost-999");
        assert_eq!(r.value, "$Colors-Ghost-999");
        assert_eq!(r.via, ResolvedVia::Unresolved);
        let warning = r.warning.unwrap();
        assert_eq!(warning.reference, "$Colors-Ghost-999");
        assert_eq!(warning.tried, vec!["ghost-999", "ghost.999", "Ghost-999", "Ghost.999"]);
        assert_eq!(warning.to_string(), "Could not resolve variable: $Colors-Ghost-999");
    }

    #[test]
    fn test_plain_strings_pass_through() {
        let table = sample_table();
        let resolver = ReferenceResolver::new(&table);
        let r = resolver.resolve("transparent");
        assert_eq!(r.value, "transparent");
        assert_eq!(r.via, ResolvedVia::PassThrough);
        assert!(r.is_resolved());
    }

    #[test]
    fn test_custom_sigil_and_no_namespace() {
        let table = sample_table();
        let options = ResolverOptions {
            sigil: '@',
            namespace: None,
        };
        let resolver = ReferenceResolver::with_options(&table, options);
        assert_eq!(resolver.resolve("@base-black").value, "#000000FF");
        assert_eq!(resolver.resolve("$base-black").via, ResolvedVia::PassThrough);
        assert!(!resolver.resolve("@Colors-Base-Black").is_resolved());
    }

    #[test]
    fn test_alias_table_names_are_lowercase() {
        for alias in ALIASES {
            assert_eq!(alias.name, alias.name.to_lowercase());
        }
    }
}

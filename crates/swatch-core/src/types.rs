//! Core value types for swatch.

use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::LazyLock;

/// Prefix shared by every literal color value.
pub const HEX_PREFIX: char = '#';

static HEX_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6,8}$").expect("hex literal pattern is valid"));

/// Check whether a value is a literal `#RRGGBB` / `#RRGGBBAA` color.
pub fn is_hex_literal(value: &str) -> bool {
    HEX_LITERAL.is_match(value)
}

/// A key path from a tree root, like `bg.surface.card`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenPath(pub SmallVec<[String; 4]>);

impl TokenPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path extended by one key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        TokenPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments joined with `.`.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }

    /// Segments joined with `-`; this is also the CSS custom-property name.
    pub fn dashed(&self) -> String {
        self.0.join("-")
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

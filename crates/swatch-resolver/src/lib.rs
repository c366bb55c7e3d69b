//! Reference resolution for swatch theme mappings.
//!
//! This crate resolves:
//! - Symbolic references (`$Colors-Base-white` -> `#FFFFFFFF`)
//! - Whole theme trees, keeping their shape and key order

mod references;
mod themes;

pub use references::{
    Alias, KeyStrategy, ReferenceResolver, Resolution, ResolvedVia, ResolverOptions,
    UnresolvedReference, ALIASES, KEY_STRATEGIES,
};
pub use themes::{resolve_theme, resolve_themes, ResolvedTheme, UnresolvedLeaf};

use swatch_core::{LookupTable, ThemeMapping};

/// Resolve every theme in a mapping document against a lookup table.
pub fn resolve(mapping: &ThemeMapping, table: &LookupTable, options: &ResolverOptions) -> Vec<ResolvedTheme> {
    let resolver = ReferenceResolver::with_options(table, options.clone());
    resolve_themes(mapping, &resolver)
}

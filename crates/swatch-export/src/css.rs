//! CSS custom-property export.
//!
//! The default theme is written to `:root`; every other theme gets an
//! attribute-selector block such as `[data-theme="dark"]`. Property names are
//! the leaf's full key path joined with dashes, in tree order.

use crate::format_timestamp;
use chrono::{DateTime, Utc};
use serde_json::Value;
use swatch_core::{leaves, TokenTree};
use swatch_resolver::ResolvedTheme;

/// Stylesheet options.
#[derive(Debug, Clone)]
pub struct CssOptions {
    /// Theme emitted in the `:root` block.
    pub default_theme: String,
    /// Attribute used to select non-default themes.
    pub theme_attribute: String,
    /// Title line of the header comment.
    pub title: String,
    /// Input file names recorded in the header comment.
    pub sources: Vec<String>,
    /// File name used in the header's `@import` example.
    pub stylesheet_name: String,
    pub indent: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            default_theme: "light".to_string(),
            theme_attribute: "data-theme".to_string(),
            title: "Sentinel Design System - Color Tokens".to_string(),
            sources: vec![
                "base-styles.json".to_string(),
                "sentinel-ds-colors-mapped.json".to_string(),
            ],
            stylesheet_name: "sentinel-ds-colors.css".to_string(),
            indent: "  ".to_string(),
        }
    }
}

/// A single `--name: value;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// Export themes to a complete stylesheet.
pub fn export(themes: &[ResolvedTheme], options: &CssOptions, generated_at: DateTime<Utc>) -> String {
    let mut css = render_header(themes, options, generated_at);

    let default_tree = themes
        .iter()
        .find(|t| t.name == options.default_theme)
        .map(|t| &t.tree);
    let empty = TokenTree::new();
    css.push('\n');
    css.push_str(&render_block(
        ":root",
        &format!("{} theme (default)", title_case(&options.default_theme)),
        default_tree.unwrap_or(&empty),
        &options.indent,
    ));

    for theme in themes.iter().filter(|t| t.name != options.default_theme) {
        css.push('\n');
        css.push_str(&render_block(
            &theme_selector(options, &theme.name),
            &format!("{} theme", title_case(&theme.name)),
            &theme.tree,
            &options.indent,
        ));
    }

    css
}

/// Attribute selector for a non-default theme.
pub fn theme_selector(options: &CssOptions, theme: &str) -> String {
    format!("[{}=\"{}\"]", options.theme_attribute, theme)
}

/// Flatten a tree into custom-property declarations, in tree order.
pub fn declarations(tree: &TokenTree) -> Vec<Declaration> {
    leaves(tree)
        .into_iter()
        .map(|(path, value)| Declaration {
            name: format!("--{}", path.dashed()),
            value: css_value(value),
        })
        .collect()
}

fn css_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render one selector block with a leading comment.
pub fn render_block(selector: &str, comment: &str, tree: &TokenTree, indent: &str) -> String {
    let mut block = format!("{selector} {{\n{indent}/* {comment} */\n");
    for decl in declarations(tree) {
        block.push_str(&format!("{indent}{}: {};\n", decl.name, decl.value));
    }
    block.push_str("}\n");
    block
}

/// The static header comment: provenance plus usage snippets.
pub fn render_header(themes: &[ResolvedTheme], options: &CssOptions, generated_at: DateTime<Utc>) -> String {
    let toggle_theme = themes
        .iter()
        .map(|t| t.name.as_str())
        .find(|name| *name != options.default_theme)
        .unwrap_or("dark");

    let lines = [
        "/**".to_string(),
        format!(" * {}", options.title),
        " *".to_string(),
        format!(" * Auto-generated from {}", options.sources.join(" and ")),
        format!(" * Generated at: {}", format_timestamp(generated_at)),
        " *".to_string(),
        " * Usage in Vue:".to_string(),
        " *".to_string(),
        " * <style>".to_string(),
        format!(" * @import './{}';", options.stylesheet_name),
        " *".to_string(),
        " * .card {".to_string(),
        " *   background-color: var(--bg-surface-card);".to_string(),
        " *   color: var(--text-primary);".to_string(),
        " * }".to_string(),
        " * </style>".to_string(),
        " *".to_string(),
        " * Toggle themes:".to_string(),
        format!(
            " * document.documentElement.setAttribute('{}', '{}');",
            options.theme_attribute, toggle_theme
        ),
        " */".to_string(),
    ];

    let mut header = lines.join("\n");
    header.push('\n');
    header
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

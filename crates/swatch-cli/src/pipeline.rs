//! Token build pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: Read the palette and theme mapping documents
//! 2. **Resolve**: Flatten the palette and resolve every theme leaf
//! 3. **Output**: Write the resolved JSON and the CSS stylesheet
//!
//! Unresolved references are logged and counted but never fail the build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn};

use swatch_core::{leaf_count, KeyCollision, LookupTable, Palette, PaletteOptions, ThemeMapping};
use swatch_export::{export_css, export_json, write_artifact, CssOptions, JsonOptions};
use swatch_resolver::{resolve, ResolvedTheme, ResolverOptions};

pub const DEFAULT_PALETTE_FILE: &str = "base-styles.json";
pub const DEFAULT_MAPPING_FILE: &str = "sentinel-ds-colors-mapped.json";
pub const DEFAULT_JSON_FILE: &str = "sentinel-ds-colors-resolved.json";
pub const DEFAULT_CSS_FILE: &str = "sentinel-ds-colors.css";

/// Where to read inputs, where to write outputs, and how to resolve.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Base directory; relative file paths are joined onto it.
    pub dir: PathBuf,
    pub palette_file: PathBuf,
    pub mapping_file: PathBuf,
    pub json_file: PathBuf,
    pub css_file: PathBuf,
    pub palette: PaletteOptions,
    pub resolver: ResolverOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            palette_file: PathBuf::from(DEFAULT_PALETTE_FILE),
            mapping_file: PathBuf::from(DEFAULT_MAPPING_FILE),
            json_file: PathBuf::from(DEFAULT_JSON_FILE),
            css_file: PathBuf::from(DEFAULT_CSS_FILE),
            palette: PaletteOptions::default(),
            resolver: ResolverOptions::default(),
        }
    }
}

impl BuildConfig {
    /// Defaults rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn palette_path(&self) -> PathBuf {
        self.dir.join(&self.palette_file)
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.dir.join(&self.mapping_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    pub fn css_path(&self) -> PathBuf {
        self.dir.join(&self.css_file)
    }

    /// Input file names recorded as provenance in both artifacts.
    pub fn source_names(&self) -> Vec<String> {
        vec![file_name(&self.palette_file), file_name(&self.mapping_file)]
    }

    fn json_options(&self) -> JsonOptions {
        JsonOptions {
            generated_from: self.source_names(),
            ..JsonOptions::default()
        }
    }

    fn css_options(&self) -> CssOptions {
        CssOptions {
            sources: self.source_names(),
            stylesheet_name: file_name(&self.css_file),
            ..CssOptions::default()
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Result of the load stage.
#[derive(Debug)]
pub struct LoadResult {
    pub palette: Palette,
    pub mapping: ThemeMapping,
}

/// Read both input documents. Either one missing or malformed is fatal.
pub fn load(config: &BuildConfig) -> Result<LoadResult> {
    let palette_path = config.palette_path();
    let palette = Palette::load(&palette_path)
        .with_context(|| format!("load palette {}", palette_path.display()))?;
    let mapping_path = config.mapping_path();
    let mapping = ThemeMapping::load(&mapping_path)
        .with_context(|| format!("load theme mapping {}", mapping_path.display()))?;
    info!(
        palette = %palette_path.display(),
        mapping = %mapping_path.display(),
        themes = mapping.theme_trees().count(),
        "loaded inputs"
    );
    Ok(LoadResult { palette, mapping })
}

// ============================================================================
// Stage 2: Resolve
// ============================================================================

/// Result of the resolve stage.
#[derive(Debug)]
pub struct ResolveResult {
    /// Number of keys in the lookup table.
    pub lookup_keys: usize,
    pub collisions: Vec<KeyCollision>,
    pub themes: Vec<ResolvedTheme>,
}

impl ResolveResult {
    pub fn unresolved_count(&self) -> usize {
        self.themes.iter().map(|t| t.unresolved.len()).sum()
    }
}

/// Flatten the palette and resolve every theme, logging each unresolved reference.
pub fn resolve_stage(loaded: &LoadResult, config: &BuildConfig) -> Result<ResolveResult> {
    let table = LookupTable::from_palette(&loaded.palette, &config.palette)
        .context("build palette lookup table")?;
    for collision in table.collisions() {
        warn!(
            key = %collision.key,
            first = %collision.first,
            second = %collision.second,
            "palette key collision; later value wins"
        );
    }
    debug!(keys = table.len(), "built lookup table");

    let themes = resolve(&loaded.mapping, &table, &config.resolver);
    for theme in &themes {
        for leaf in &theme.unresolved {
            warn!(theme = %theme.name, path = %leaf.path, "{}", leaf.reference);
        }
        info!(
            theme = %theme.name,
            tokens = leaf_count(&theme.tree),
            unresolved = theme.unresolved.len(),
            "resolved theme"
        );
    }

    Ok(ResolveResult {
        lookup_keys: table.len(),
        collisions: table.collisions().to_vec(),
        themes,
    })
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub css: PathBuf,
}

/// Serialize and write both artifacts. A write failure names the artifact.
pub fn output(themes: &[ResolvedTheme], config: &BuildConfig, generated_at: DateTime<Utc>) -> Result<OutputPaths> {
    let json_path = config.json_path();
    let json = export_json(themes, &config.json_options(), generated_at).context("serialize resolved JSON")?;
    write_artifact(&json_path, &json, "resolved JSON")?;
    info!(path = %json_path.display(), "wrote resolved JSON");

    let css_path = config.css_path();
    let css = export_css(themes, &config.css_options(), generated_at);
    write_artifact(&css_path, &css, "CSS stylesheet")?;
    info!(path = %css_path.display(), "wrote CSS stylesheet");

    Ok(OutputPaths {
        json: json_path,
        css: css_path,
    })
}

// ============================================================================
// Full build
// ============================================================================

/// Per-theme counts for the build report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSummary {
    pub name: String,
    pub tokens: usize,
    pub unresolved: Vec<String>,
}

/// Everything the build report needs.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub outputs: OutputPaths,
    pub sources: Vec<String>,
    pub lookup_keys: usize,
    pub collisions: usize,
    pub themes: Vec<ThemeSummary>,
}

impl BuildResult {
    pub fn unresolved_count(&self) -> usize {
        self.themes.iter().map(|t| t.unresolved.len()).sum()
    }
}

/// Run load, resolve and output in sequence.
pub fn run_build(config: &BuildConfig, generated_at: DateTime<Utc>) -> Result<BuildResult> {
    let span = info_span!("build", dir = %config.dir.display());
    let _guard = span.enter();

    let loaded = load(config)?;
    let resolved = resolve_stage(&loaded, config)?;
    let outputs = output(&resolved.themes, config, generated_at)?;

    let unresolved = resolved.unresolved_count();
    if unresolved > 0 {
        warn!(count = unresolved, "build finished with unresolved references");
    }

    let themes = resolved
        .themes
        .iter()
        .map(|theme| ThemeSummary {
            name: theme.name.clone(),
            tokens: leaf_count(&theme.tree),
            unresolved: theme
                .unresolved
                .iter()
                .map(|leaf| leaf.reference.reference.clone())
                .collect(),
        })
        .collect();

    Ok(BuildResult {
        outputs,
        sources: config.source_names(),
        lookup_keys: resolved.lookup_keys,
        collisions: resolved.collisions.len(),
        themes,
    })
}

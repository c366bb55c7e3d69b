//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use swatch_cli::pipeline::{
    BuildConfig, DEFAULT_CSS_FILE, DEFAULT_JSON_FILE, DEFAULT_MAPPING_FILE, DEFAULT_PALETTE_FILE,
};
use swatch_core::PaletteOptions;

#[derive(Parser)]
#[command(
    name = "swatch",
    version,
    about = "Build design tokens - resolve palette references into JSON and CSS",
    long_about = "Resolve a hex palette and per-theme token mappings into a resolved JSON\n\
                  document and a CSS custom-property stylesheet.\n\n\
                  With no arguments, reads and writes the default file names in the\n\
                  current directory. Generated files are overwritten on every run."
)]
pub struct Cli {
    /// Directory holding the input documents; outputs are written here too.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Palette document (hex color definitions under `colors`).
    #[arg(long, value_name = "FILE", default_value = DEFAULT_PALETTE_FILE)]
    pub palette: PathBuf,

    /// Theme mapping document (one tree per theme).
    #[arg(long, value_name = "FILE", default_value = DEFAULT_MAPPING_FILE)]
    pub mapping: PathBuf,

    /// Resolved JSON output file.
    #[arg(long = "json-out", value_name = "FILE", default_value = DEFAULT_JSON_FILE)]
    pub json_out: PathBuf,

    /// CSS stylesheet output file.
    #[arg(long = "css-out", value_name = "FILE", default_value = DEFAULT_CSS_FILE)]
    pub css_out: PathBuf,

    /// Fail on malformed palette colors and on lookup keys claimed by two palette paths.
    #[arg(long)]
    pub strict: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            dir: self.dir.clone(),
            palette_file: self.palette.clone(),
            mapping_file: self.mapping.clone(),
            json_file: self.json_out.clone(),
            css_file: self.css_out.clone(),
            palette: PaletteOptions {
                strict: self.strict,
            },
            ..BuildConfig::default()
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["swatch"]).unwrap();
        let config = cli.build_config();
        assert_eq!(config.palette_path(), PathBuf::from("./base-styles.json"));
        assert_eq!(config.css_path(), PathBuf::from("./sentinel-ds-colors.css"));
        assert!(!config.palette.strict);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "swatch",
            "--dir",
            "tokens",
            "--css-out",
            "dist/colors.css",
            "--strict",
        ])
        .unwrap();
        let config = cli.build_config();
        assert_eq!(config.css_path(), PathBuf::from("tokens/dist/colors.css"));
        assert!(config.palette.strict);
    }
}

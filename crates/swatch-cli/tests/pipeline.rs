//! Integration tests for the build pipeline, run against real files.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use swatch_cli::pipeline::{run_build, BuildConfig};
use swatch_core::PaletteOptions;

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 10, 8, 30, second).unwrap()
}

fn write_json(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn write_inputs(dir: &Path) {
    write_json(
        dir,
        "base-styles.json",
        &json!({
            "colors": {
                "base": { "white": "#FFFFFFFF", "black": "#000000FF" },
                "storm": { "100": "#DDE6F1FF", "200": "#C4D2E4FF" },
                "gray-true": { "50": "#FAFAFAFF", "900": "#171717FF" }
            }
        }),
    );
    write_json(
        dir,
        "sentinel-ds-colors-mapped.json",
        &json!({
            "light": {
                "bg": { "primary": "$Colors-Base-white", "subtle": "$Colors-Gray-True-50" },
                "border": { "default": "$border-default" },
                "text": { "primary": "$Colors-Gray-True-900", "ghost": "$Colors-Ghost-999" }
            },
            "dark": {
                "bg": { "primary": "#0B0B0BFF", "subtle": "$Colors-Gray-True-900" },
                "text": { "primary": "$Colors-Base-white" }
            }
        }),
    );
}

#[test]
fn test_build_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let result = run_build(&BuildConfig::in_dir(dir.path()), at(0)).unwrap();

    let resolved: Value =
        serde_json::from_str(&fs::read_to_string(&result.outputs.json).unwrap()).unwrap();
    assert_eq!(resolved["meta"]["generatedAt"], "2025-02-10T08:30:00.000000Z");
    assert_eq!(
        resolved["meta"]["generatedFrom"],
        json!(["base-styles.json", "sentinel-ds-colors-mapped.json"])
    );
    assert_eq!(
        resolved["light"],
        json!({
            "bg": { "primary": "#FFFFFFFF", "subtle": "#FAFAFAFF" },
            "border": { "default": "#DDE6F1FF" },
            "text": { "primary": "#171717FF", "ghost": "$Colors-Ghost-999" }
        })
    );
    assert_eq!(resolved["dark"]["bg"]["primary"], "#0B0B0BFF");

    let css = fs::read_to_string(&result.outputs.css).unwrap();
    assert!(css.contains(":root {\n  /* Light theme (default) */\n  --bg-primary: #FFFFFFFF;\n"));
    assert!(css.contains("[data-theme=\"dark\"] {\n  /* Dark theme */\n  --bg-primary: #0B0B0BFF;\n"));
}

#[test]
fn test_unresolved_references_do_not_fail_build() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let result = run_build(&BuildConfig::in_dir(dir.path()), at(0)).unwrap();

    assert_eq!(result.unresolved_count(), 1);
    assert_eq!(result.themes[0].name, "light");
    assert_eq!(result.themes[0].tokens, 5);
    assert_eq!(result.themes[0].unresolved, vec!["$Colors-Ghost-999".to_string()]);
    assert!(result.themes[1].unresolved.is_empty());
}

#[test]
fn test_rerun_is_identical_apart_from_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let config = BuildConfig::in_dir(dir.path());

    let first = run_build(&config, at(0)).unwrap();
    let json_a = fs::read_to_string(&first.outputs.json).unwrap();
    let css_a = fs::read_to_string(&first.outputs.css).unwrap();

    let second = run_build(&config, at(0)).unwrap();
    assert_eq!(fs::read_to_string(&second.outputs.json).unwrap(), json_a);
    assert_eq!(fs::read_to_string(&second.outputs.css).unwrap(), css_a);

    let third = run_build(&config, at(7)).unwrap();
    let json_c = fs::read_to_string(&third.outputs.json).unwrap();
    let differing: Vec<_> = json_a
        .lines()
        .zip(json_c.lines())
        .filter(|(a, c)| a != c)
        .collect();
    assert_eq!(differing.len(), 1);
    assert!(differing[0].0.contains("\"generatedAt\""));
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_build(&BuildConfig::in_dir(dir.path()), at(0)).unwrap_err();
    assert!(format!("{err:#}").contains("load palette"));
    assert!(!dir.path().join("sentinel-ds-colors.css").exists());
}

#[test]
fn test_malformed_mapping_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("sentinel-ds-colors-mapped.json"), "{ \"light\": ").unwrap();

    let err = run_build(&BuildConfig::in_dir(dir.path()), at(0)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("load theme mapping"));
    assert!(message.contains("Invalid JSON"));
}

#[test]
fn test_write_failure_names_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let config = BuildConfig {
        css_file: "missing-dir/colors.css".into(),
        ..BuildConfig::in_dir(dir.path())
    };

    let err = run_build(&config, at(0)).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to write CSS stylesheet"));
}

#[test]
fn test_strict_mode_rejects_collisions() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    write_json(
        dir.path(),
        "base-styles.json",
        &json!({ "colors": { "Smoke": { "50": "#111111FF" }, "smoke": { "50": "#222222FF" } } }),
    );

    let lenient = run_build(&BuildConfig::in_dir(dir.path()), at(0)).unwrap();
    assert_eq!(lenient.collisions, 1);

    let strict = BuildConfig {
        palette: PaletteOptions::strict(),
        ..BuildConfig::in_dir(dir.path())
    };
    let err = run_build(&strict, at(0)).unwrap_err();
    assert!(format!("{err:#}").contains("claimed by both"));
}

#[test]
fn test_custom_file_names_are_recorded_as_provenance() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::rename(
        dir.path().join("base-styles.json"),
        dir.path().join("palette.json"),
    )
    .unwrap();
    let config = BuildConfig {
        palette_file: "palette.json".into(),
        css_file: "tokens.css".into(),
        ..BuildConfig::in_dir(dir.path())
    };

    let result = run_build(&config, at(0)).unwrap();

    assert_eq!(result.sources, vec!["palette.json", "sentinel-ds-colors-mapped.json"]);
    let css = fs::read_to_string(dir.path().join("tokens.css")).unwrap();
    assert!(css.contains("Auto-generated from palette.json and sentinel-ds-colors-mapped.json"));
    assert!(css.contains("@import './tokens.css';"));
}

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use swatch_cli::pipeline::BuildResult;

pub fn print_summary(result: &BuildResult) {
    println!("✅ Generated: {}", result.outputs.json.display());
    println!("✅ Generated: {}", result.outputs.css.display());
    println!();
    println!("🎉 Build complete!");
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("Theme"),
            header_cell("Tokens"),
            header_cell("Unresolved"),
        ]);
    let mut total_tokens = 0usize;
    for theme in &result.themes {
        total_tokens += theme.tokens;
        table.add_row(vec![
            Cell::new(&theme.name),
            Cell::new(theme.tokens).set_alignment(CellAlignment::Right),
            count_cell(theme.unresolved.len()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(total_tokens)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        count_cell(result.unresolved_count()),
    ]);
    println!("{table}");
    println!("Palette lookup keys: {}", result.lookup_keys);
    if result.collisions > 0 {
        println!("⚠️  Palette key collisions: {} (later value wins)", result.collisions);
    }
    if result.unresolved_count() > 0 {
        println!(
            "⚠️  {} unresolved reference(s) left as-is in the output",
            result.unresolved_count()
        );
    }

    println!();
    println!("Files generated:");
    println!("  - {} (for JavaScript/Vue import)", result.outputs.json.display());
    println!("  - {} (for CSS custom properties)", result.outputs.css.display());
    println!();
    println!("Source files (DO NOT MODIFY GENERATED FILES):");
    let roles = ["hex color definitions", "theme mappings"];
    for (source, role) in result.sources.iter().zip(roles) {
        println!("  - {source} ({role})");
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    let cell = Cell::new(count).set_alignment(CellAlignment::Right);
    if count > 0 {
        cell.fg(Color::Yellow)
    } else {
        cell.add_attribute(Attribute::Dim)
    }
}

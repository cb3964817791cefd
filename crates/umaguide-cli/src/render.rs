//! Plain-text rendering for terminal output.

use std::fmt::Write;
use umaguide_core::{Character, ComparisonTable};

/// One line per character: id, stars, type, total stats and name.
pub fn character_list(characters: &[&Character]) -> String {
    let mut out = String::new();
    for c in characters {
        let _ = writeln!(
            out,
            "{:<28} {:<5} {:<8} {:>4}  {}",
            c.id,
            "★".repeat(usize::from(c.rarity)),
            c.character_type.label(),
            c.total_stats(),
            c.name
        );
    }
    let _ = writeln!(out, "{} characters", characters.len());
    out
}

/// Grouped attribute rows with one column per character.
pub fn comparison_table(table: &ComparisonTable) -> String {
    let label_width = table
        .groups
        .iter()
        .flat_map(|g| g.rows.iter())
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    let column_width = table
        .columns
        .iter()
        .map(|c| c.name.chars().count())
        .chain(
            table
                .groups
                .iter()
                .flat_map(|g| g.rows.iter())
                .flat_map(|r| r.cells.iter())
                .map(|cell| cell.to_string().chars().count()),
        )
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = write!(out, "{:<label_width$}", "");
    for column in &table.columns {
        let _ = write!(out, " | {:<column_width$}", column.name);
    }
    out.push('\n');

    for group in &table.groups {
        let _ = writeln!(out, "[{}]", group.kind.label());
        for row in &group.rows {
            let _ = write!(out, "{:<label_width$}", row.label);
            for cell in &row.cells {
                let _ = write!(out, " | {:<column_width$}", cell.to_string());
            }
            out.push('\n');
        }
    }
    out
}

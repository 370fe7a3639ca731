/// Terminal output for the prune and stats reports
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

pub fn done(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Label/value table with the values right-aligned.
pub fn summary_table(title: &str, rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(title).add_attribute(Attribute::Bold).fg(Color::Cyan),
            Cell::new(""),
        ]);

    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn print_summary(title: &str, rows: &[(&str, String)]) {
    println!("{}", summary_table(title, rows));
}

pub fn print_metric_means(means: &[(String, f64)]) {
    if means.is_empty() {
        return;
    }
    println!("{}", "Quality metric means (lower is better)".bold());
    for (name, mean) in means {
        println!("  {:<24} {:>10.4}", name, mean);
    }
}

/// `1234567` -> `"1,234,567"`
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Count followed by its share of `total`, e.g. `"3 (25.0%)"`.
pub fn count_with_share(count: usize, total: usize) -> String {
    let share = if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    };
    format!("{} ({:.1}%)", group_digits(count as u64), share)
}

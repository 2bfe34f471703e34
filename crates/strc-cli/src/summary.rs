use std::path::Path;
use std::time::Duration;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use strc_core::RunSummary;
use strc_model::CodePage;

/// Where a run read from and wrote to, and how long it took.
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a> {
    pub input: &'a Path,
    /// `None` for stdout.
    pub output: Option<&'a Path>,
    pub code_page: CodePage,
    pub elapsed: Duration,
}

/// Prints the run summary to stderr so it never mixes with CSV on stdout.
pub fn print_summary(summary: &RunSummary, report: &RunReport<'_>) {
    eprintln!("{}", summary_table(summary, report));
}

pub fn summary_table(summary: &RunSummary, report: &RunReport<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let output = report
        .output
        .map_or_else(|| "stdout".to_string(), |path| path.display().to_string());
    table.add_row(vec![
        label_cell("Input"),
        Cell::new(report.input.display()),
    ]);
    table.add_row(vec![label_cell("Output"), Cell::new(output)]);
    table.add_row(vec![label_cell("Code page"), Cell::new(report.code_page)]);
    table.add_row(vec![label_cell("Strategy"), Cell::new(summary.strategy)]);
    table.add_row(vec![
        label_cell("Rows read"),
        Cell::new(summary.rows_read).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        label_cell("Rows written"),
        Cell::new(summary.rows_written)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        label_cell("Duplicates dropped"),
        count_cell(summary.rows_dropped, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Empty keys kept"),
        count_cell(summary.empty_keys, Color::Blue),
    ]);
    table.add_row(vec![
        label_cell("Malformed records"),
        count_cell(summary.records_skipped, Color::Red),
    ]);
    table.add_row(vec![
        label_cell("Elapsed"),
        dim_cell(format!("{:.3}s", report.elapsed.as_secs_f64())),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! Console summary of a batch run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
};

use bulletin_output::BatchReport;

pub fn print_summary(report: &BatchReport) {
    println!("Source: {}", report.source_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Date"),
        header_cell("Session"),
        header_cell("Rows"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for outcome in &report.documents {
        let status = match &outcome.error {
            Some(error) => Cell::new(error.clone()).fg(Color::Red),
            None => Cell::new("\u{2713}")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![
            Cell::new(outcome.source_file.clone()),
            Cell::new(outcome.bulletin_date.clone()),
            Cell::new(outcome.session),
            Cell::new(outcome.rows),
            status,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(report.total_rows).add_attribute(Attribute::Bold),
        if report.has_failures() {
            Cell::new(format!("{} failed", report.failed_count())).fg(Color::Red)
        } else {
            Cell::new("all processed").fg(Color::Green)
        },
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

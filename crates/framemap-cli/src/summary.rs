use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use framemap_common::any_to_string;
use framemap_core::RunStats;
use framemap_cli::pipeline::RunReport;
use polars::prelude::{AnyValue, DataFrame};

pub fn print_summary(report: &RunReport, preview: usize) {
    println!("Mapping set: {}", report.mapping);
    println!("Input: {}", report.input.display());
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &report.stats_json {
        println!("Stats: {}", path.display());
    }

    let stats = &report.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source rows"),
        header_cell("Emitted"),
        header_cell("Dropped"),
        header_cell("Missing columns"),
        header_cell("Columns"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(stats.source_rows).add_attribute(Attribute::Bold),
        emitted_cell(stats),
        count_cell(stats.dropped_rows, Color::Yellow),
        count_cell(stats.missing_source_reports, Color::Red),
        Cell::new(stats.columns.join(", ")),
    ]);
    println!("{table}");

    if preview > 0 && report.data.height() > 0 {
        println!();
        println!("Preview ({} of {} rows):", preview.min(report.data.height()), report.data.height());
        println!("{}", preview_table(&report.data, preview));
    }
}

pub fn preview_table(df: &DataFrame, limit: usize) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    table.set_header(names.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    for index in 0..df.height().min(limit) {
        let row: Vec<Cell> = df
            .get_columns()
            .iter()
            .map(|column| match column.get(index) {
                Ok(AnyValue::Null) | Err(_) => dim_cell("-"),
                Ok(value) => Cell::new(any_to_string(value)),
            })
            .collect();
        table.add_row(row);
    }
    table
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn emitted_cell(stats: &RunStats) -> Cell {
    let cell = Cell::new(stats.emitted_rows);
    if stats.all_rows_emitted() {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

//! Human-readable rendering of a validation report.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use prism_model::Report;

pub fn print_summary(report: &Report) {
    println!("Schema version: {}", report.schema_version);
    let verdict = if report.valid {
        Cell::new("VALID").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("INVALID").fg(Color::Red).add_attribute(Attribute::Bold)
    };

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Result"),
        header_cell("Subjects"),
        header_cell("Sessions"),
        header_cell("Data files"),
        header_cell("Sidecars"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        verdict,
        Cell::new(report.summary.subjects),
        match report.summary.sessions {
            Some(count) => Cell::new(count),
            None => dim_cell("-"),
        },
        Cell::new(report.summary.data_files),
        Cell::new(report.summary.sidecar_files),
        count_cell(report.error_count(), Color::Red),
        count_cell(report.warning_count(), Color::Yellow),
    ]);
    println!("{table}");

    print_modality_table(report);
    print_issue_tables(report);
}

fn print_modality_table(report: &Report) {
    if report.summary.modalities.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Modality"), header_cell("Files")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (modality, files) in &report.summary.modalities {
        table.add_row(vec![Cell::new(modality), Cell::new(files)]);
    }
    println!();
    println!("Modalities:");
    println!("{table}");
    if !report.summary.tasks.is_empty() {
        println!("Tasks: {}", report.summary.tasks.join(", "));
    }
}

fn print_issue_tables(report: &Report) {
    if !report.errors.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Code"),
            header_cell("Path"),
            header_cell("Message"),
        ]);
        apply_issue_table_style(&mut table);
        for (code, errors) in report.errors_by_code() {
            for error in errors {
                table.add_row(vec![
                    Cell::new(code.as_str()).fg(Color::Red),
                    Cell::new(&error.path),
                    Cell::new(&error.message),
                ]);
            }
        }
        println!();
        println!("Errors:");
        println!("{table}");
    }

    if !report.warnings.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Code"), header_cell("Message")]);
        apply_issue_table_style(&mut table);
        for warning in &report.warnings {
            table.add_row(vec![
                Cell::new(warning.code.as_str()).fg(Color::Yellow),
                Cell::new(&warning.message),
            ]);
        }
        println!();
        println!("Warnings:");
        println!("{table}");
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
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

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(26)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

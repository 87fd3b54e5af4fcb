//! Terminal tables for per-tick statistics

use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::{Cell, Row, Table};

/// Borderless table with bold titles and a rule under them
pub fn stats_table(titles: &[&str]) -> Table {
    let format = FormatBuilder::new()
        .column_separator(' ')
        .separator(LinePosition::Title, LineSeparator::new('-', ' ', ' ', ' '))
        .padding(1, 1)
        .build();

    let mut table = Table::new();
    table.set_format(format);
    table.set_titles(Row::new(
        titles.iter().map(|t| Cell::new(t).style_spec("b")).collect(),
    ));
    table
}

/// Append a row with numeric columns right-aligned
///
/// The last column holds free text (bounds) and stays left-aligned.
pub fn push_stats_row(table: &mut Table, cells: &[String]) {
    let last = cells.len().saturating_sub(1);
    let row = cells
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let cell = Cell::new(text);
            if i < last { cell.style_spec("r") } else { cell }
        })
        .collect();
    table.add_row(Row::new(row));
}

//! Grouping-key forward fill, per-row identifiers, and source provenance.

use bulletin_model::schema::{RIVER, SOURCE_FILE, UNIQUE_ID};
use bulletin_model::{BulletinMetadata, CellValue, Table};

/// Bulletins state a river once and list its stations below it. Fills empty
/// river cells from the nearest preceding named river; rows ahead of the
/// first heading inherit that first heading.
pub fn forward_fill_river(table: &mut Table) {
    let Some(index) = table.column_index(RIVER) else {
        return;
    };
    let first = table
        .column_cells(index)
        .find(|cell| !cell.is_missing())
        .cloned();
    let Some(first) = first else {
        return;
    };
    let mut last = first;
    for row in 0..table.height() {
        if table.cell(row, index).is_missing() {
            table.set_cell(row, index, last.clone());
        } else {
            last = table.cell(row, index).clone();
        }
    }
}

/// Stamps each row with its identifier (1-based ordinal, bulletin date and
/// session joined by underscores) and the source filename. Row order is the
/// source order; this must run before any reordering.
pub fn assign_identity(table: &mut Table, meta: &BulletinMetadata) {
    table.insert_column(0, UNIQUE_ID);
    if let Some(index) = table.column_index(UNIQUE_ID) {
        for row in 0..table.height() {
            let id = format!("{}_{}_{}", row + 1, meta.bulletin_date, meta.session);
            table.set_cell(row, index, CellValue::Text(id));
        }
    }
    table.ensure_column(SOURCE_FILE);
    if let Some(index) = table.column_index(SOURCE_FILE) {
        for row in 0..table.height() {
            table.set_cell(row, index, CellValue::Text(meta.source_file.clone()));
        }
    }
}

use std::path::Path;

use super::model::Table;
use crate::error::{Error, Result};

/// Write `table` as comma-delimited text with a header row and no index
/// column, creating parent directories and overwriting any existing file.
///
/// Cells are written with their `Display` form, so [`super::loader::load_table`]
/// reads back a table with the same headers and cell text (see [`Table::same_data`]).
pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

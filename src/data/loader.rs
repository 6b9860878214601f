use std::io::Read;
use std::path::Path;

use log::debug;

use super::model::{ColumnType, Table};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a recording from a comma-delimited file with a header row.
///
/// Column types are inferred per column (see [`ColumnType::infer`]). A path
/// that does not exist fails with [`Error::NotFound`]; ragged rows or other
/// malformed content fail with [`Error::Csv`].
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let table = read_table(file)?;
    debug!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parse a table from any reader.
pub fn read_table<R: Read>(source: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    // Inference needs every field of a column, so buffer the raw records first.
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|col| ColumnType::infer(records.iter().map(|r| r.get(col).unwrap_or(""))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            column_types
                .iter()
                .enumerate()
                .map(|(col, ty)| ty.parse(record.get(col).unwrap_or("")))
                .collect()
        })
        .collect();

    Ok(Table {
        headers,
        column_types,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    #[test]
    fn reads_typed_columns() {
        let csv = "method,eye_id,phi,theta,note\n\
                   2d c++,0,1.5,-0.25,\n\
                   pye3d 0.3.0 real-time,1,2,3,ok\n";
        let table = read_table(csv.as_bytes()).unwrap();

        assert_eq!(table.headers, ["method", "eye_id", "phi", "theta", "note"]);
        assert_eq!(
            table.column_types,
            [
                ColumnType::Text,
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Float,
                ColumnType::Text
            ]
        );
        assert_eq!(table.rows[0][4], CellValue::Null);
        assert_eq!(table.rows[1][2], CellValue::Float(2.0));
        assert_eq!(table.rows[1][1], CellValue::Integer(1));
    }

    #[test]
    fn header_only_input_yields_empty_table() {
        let table = read_table("method,eye_id,phi,theta\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 4);
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let err = read_table("a,b\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)), "got {err:?}");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_table(Path::new("/definitely/not/here/pupil_positions.csv")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
    }
}
